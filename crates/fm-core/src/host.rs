//! Wire types exchanged with the desktop host bridge.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of a file pick.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileSelection {
    pub file_path: String,
    pub file_name: String,
}

/// Result of a folder pick.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FolderSelection {
    pub folder_path: String,
    pub folder_name: String,
}

/// Metadata for a linked path.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    /// Lowercased, including the leading dot (`".csv"`), empty when absent.
    pub extension: String,
    pub modified: DateTime<Utc>,
    pub is_directory: bool,
}
