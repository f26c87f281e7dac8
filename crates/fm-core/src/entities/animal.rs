use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AnimalKind, FieldKind};
use crate::field_value::FieldValue;

/// One name/value/kind entry in an animal's flexible property bag.
///
/// Covers both built-in fields (birth date, weight, sex, ...) and
/// project-defined custom fields. `name` is assumed unique per animal.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnimalProperty {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type", default)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl AnimalProperty {
    /// Interpret the stored string according to `kind`.
    ///
    /// A date that does not parse (legacy values like `"3mo"`) reads as text.
    #[must_use]
    pub fn typed_value(&self) -> FieldValue {
        FieldValue::parse(self.kind, &self.value)
            .unwrap_or_else(|_| FieldValue::Text(self.value.clone()))
    }
}

/// A tracked research subject or sample.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: AnimalKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default)]
    pub properties: Vec<AnimalProperty>,
    #[serde(default)]
    pub experiment_ids: Vec<String>,
    /// Ordered subset of property names rendered on summary cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_properties: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl Animal {
    /// Look up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&AnimalProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}
