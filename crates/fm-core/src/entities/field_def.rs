use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AnimalKind, AppliesTo, FieldKind};
use crate::errors::CoreError;
use crate::field_value::FieldValue;

/// Project-scoped schema definition for an animal field.
///
/// Built-in definitions occupy negative `order` values so custom fields sort
/// after them. Built-ins are synthesized at read time (see
/// [`crate::builtins`]) and only appear here if a project stores an override.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnimalProperty {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Allowed values for `select` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub applies_to: AppliesTo,
}

impl ProjectAnimalProperty {
    #[must_use]
    pub const fn applies_to_kind(&self, kind: AnimalKind) -> bool {
        self.applies_to.includes(kind)
    }

    /// Validate a raw value against this definition.
    ///
    /// Returns `Ok(None)` for an empty value on an optional field.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if a required value is empty, a date
    /// does not parse as `YYYY-MM-DD`, or a select value is not one of
    /// `options`.
    pub fn validate_value(&self, raw: &str) -> Result<Option<FieldValue>, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            if self.required {
                return Err(CoreError::Validation(format!(
                    "'{}' is required",
                    self.name
                )));
            }
            return Ok(None);
        }

        let value = FieldValue::parse(self.kind, trimmed)?;
        if let FieldValue::Select(choice) = &value {
            if !self.options.is_empty() && !self.options.iter().any(|o| o == choice) {
                return Err(CoreError::Validation(format!(
                    "'{choice}' is not an option for '{}' (expected one of: {})",
                    self.name,
                    self.options.join(", ")
                )));
            }
        }
        Ok(Some(value))
    }
}
