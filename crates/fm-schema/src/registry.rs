//! Central schema registry for the persisted FileMap types.
//!
//! The `SchemaRegistry` builds JSON Schemas from fm-core types at construction
//! time using [`schemars::schema_for!`] and validates values via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Name of the full state document schema.
pub const APP_STATE: &str = "app_state";
/// Name of the backup envelope schema.
pub const EXPORT_BUNDLE: &str = "export_bundle";

/// Central store of the JSON Schemas FileMap reads and writes.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map. A schema that fails to convert is skipped;
/// `schemars` output is plain JSON so this does not happen in practice.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        if let Ok(value) = serde_json::to_value(schema_for!($ty)) {
            $map.insert($name, value);
        }
    };
}

impl SchemaRegistry {
    /// Build a registry containing the state, entity, backup, and host-bridge
    /// schemas from fm-core.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Documents (2) ---
        register!(schemas, APP_STATE, fm_core::state::AppStateDocument);
        register!(schemas, EXPORT_BUNDLE, fm_core::transfer::ExportBundle);

        // --- Entities (8) ---
        register!(schemas, "project", fm_core::entities::Project);
        register!(schemas, "property", fm_core::entities::Property);
        register!(schemas, "experiment", fm_core::entities::Experiment);
        register!(
            schemas,
            "experiment_property",
            fm_core::entities::ExperimentProperty
        );
        register!(schemas, "animal", fm_core::entities::Animal);
        register!(schemas, "animal_property", fm_core::entities::AnimalProperty);
        register!(
            schemas,
            "project_animal_property",
            fm_core::entities::ProjectAnimalProperty
        );
        register!(schemas, "filters", fm_core::state::Filters);

        // --- Host bridge (3) ---
        register!(schemas, "file_selection", fm_core::host::FileSelection);
        register!(schemas, "folder_selection", fm_core::host::FolderSelection);
        register!(schemas, "file_info", fm_core::host::FileInfo);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
