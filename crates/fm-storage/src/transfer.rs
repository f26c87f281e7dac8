//! Backup export and import.
//!
//! A backup is an [`ExportBundle`]. Import is deliberately lenient about
//! everything except the `data.projects` array: the document is checked
//! against the registered schema, but a mismatch is only logged, and the data
//! then goes through the same migration as a loaded state file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fm_core::state::AppState;
use fm_core::transfer::ExportBundle;
use fm_schema::{SchemaError, SchemaRegistry, registry::EXPORT_BUNDLE};
use fm_state::migration;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::StorageError;
use crate::file::write_atomic;

/// Wrap the current state in a backup envelope.
#[must_use]
pub fn export_bundle(state: &AppState, now: DateTime<Utc>) -> ExportBundle {
    ExportBundle::new(state.clone(), now)
}

/// Write a backup. When `target` is a directory the dated default file name
/// is used inside it. Returns the path written.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the write fails.
pub fn write_export(
    state: &AppState,
    target: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf, StorageError> {
    let bundle = export_bundle(state, now);
    let path = if target.is_dir() {
        target.join(bundle.file_name())
    } else {
        target.to_path_buf()
    };
    let text = serde_json::to_string_pretty(&bundle)?;
    write_atomic(&path, &text)?;
    info!(path = %path.display(), projects = state.projects.len(), "backup exported");
    Ok(path)
}

/// Parse and migrate a backup document.
///
/// # Errors
///
/// Returns `StorageError::Import` if the text is not JSON, has no
/// `data.projects` array, or its data cannot be read as application state.
pub fn parse_import(text: &str) -> Result<AppState, StorageError> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| StorageError::Import(format!("not a JSON document: {e}")))?;

    if !document
        .pointer("/data/projects")
        .is_some_and(Value::is_array)
    {
        return Err(StorageError::Import(
            "expected a `data.projects` array".to_string(),
        ));
    }

    match SchemaRegistry::new().validate(EXPORT_BUNDLE, &document) {
        Ok(()) => {}
        Err(SchemaError::ValidationFailed { errors }) => {
            warn!(count = errors.len(), first = ?errors.first(), "backup does not match schema, importing anyway");
        }
        Err(error) => warn!(%error, "backup schema check skipped"),
    }

    let Some(data) = document.get("data").cloned() else {
        return Err(StorageError::Import("missing `data`".to_string()));
    };
    let state = migration::into_state(data).map_err(|e| StorageError::Import(e.to_string()))?;
    info!(projects = state.projects.len(), "backup parsed");
    Ok(state)
}

/// Read and parse a backup file.
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be read, or any error of
/// [`parse_import`].
pub fn read_import(path: &Path) -> Result<AppState, StorageError> {
    let text = std::fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    parse_import(&text)
}
