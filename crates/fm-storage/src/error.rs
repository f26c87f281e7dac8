//! Storage error types for fm-storage.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from backends, serialization, and backup import.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure on a specific path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// State could not be serialized or parsed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A key-value write would exceed the store's quota.
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: u64, quota: u64 },

    /// A backup file was rejected; nothing was changed.
    #[error("Invalid backup: {0}")]
    Import(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
