//! Export envelope for user backups.
//!
//! A backup is `{ exportDate, version, data }` where `data` is a full
//! [`AppState`] document. Importing the same shape replaces all state.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Format version stamped on every export.
pub const EXPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub export_date: DateTime<Utc>,
    pub version: String,
    pub data: AppState,
}

impl ExportBundle {
    #[must_use]
    pub fn new(data: AppState, export_date: DateTime<Utc>) -> Self {
        Self {
            export_date,
            version: EXPORT_VERSION.to_string(),
            data,
        }
    }

    /// Suggested download name, e.g. `research-manager-backup-2026-10-18.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "research-manager-backup-{}.json",
            self.export_date.format("%Y-%m-%d")
        )
    }
}
