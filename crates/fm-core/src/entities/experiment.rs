use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-experiment binding of a project [`Property`](super::Property) to a file or folder.
///
/// At most one of `file_path` / `folder_path` is expected to be set. `file_name`
/// is a display label, not a path component.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentProperty {
    pub property_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<String>,
}

impl ExperimentProperty {
    /// Whether this binding points at anything on disk.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.file_path.is_some() || self.folder_path.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: Vec<ExperimentProperty>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// ISO date string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// ISO date string, for date ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub linked_animal_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Experiment {
    /// The binding for `property_id`, if one exists.
    #[must_use]
    pub fn binding(&self, property_id: &str) -> Option<&ExperimentProperty> {
        self.properties.iter().find(|b| b.property_id == property_id)
    }

    /// Tag membership test; tag order carries no meaning.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
