use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PropertyKind;

/// A named, typed slot defined once per project and shared by all its experiments.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    /// Free-form label, only meaningful when `kind` is `custom`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,
}
