use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Animal, Experiment, ProjectAnimalProperty, Property};

/// A research project: the unit that owns experiments, animals, and both
/// property schemas.
///
/// Experiments and animals are expected to reference only this project's own
/// property and field-definition IDs. Broken references are inert.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub experiments: Vec<Experiment>,
    #[serde(default)]
    pub animals: Vec<Animal>,
    #[serde(default)]
    pub animal_properties: Vec<ProjectAnimalProperty>,
    /// Built-in field IDs the user removed; suppresses resynthesis.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted_built_in_properties: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// A fresh, empty project.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            properties: Vec::new(),
            experiments: Vec::new(),
            animals: Vec::new(),
            animal_properties: Vec::new(),
            deleted_built_in_properties: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn experiment(&self, id: &str) -> Option<&Experiment> {
        self.experiments.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn animal(&self, id: &str) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn property(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }
}
