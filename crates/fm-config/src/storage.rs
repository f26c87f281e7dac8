//! State storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which persistence backend to open at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendChoice {
    /// Use the state file when the data directory is writable, else an
    /// in-memory key-value store.
    #[default]
    Auto,
    /// Single JSON state file under `data_dir`.
    File,
    /// Key-value store directory under `data_dir`, subject to `kv_quota_bytes`.
    KeyValue,
}

fn default_file_name() -> String {
    "research-manager-data.json".to_string()
}

fn default_kv_key() -> String {
    "research-manager-state".to_string()
}

/// 5 MiB, the usual browser local-storage allowance.
const fn default_kv_quota_bytes() -> u64 {
    5 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: BackendChoice,

    /// Data directory. Empty means the platform data dir (`~/.local/share/filemap`
    /// on Linux).
    #[serde(default)]
    pub data_dir: String,

    /// State file name inside `data_dir`.
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Key under which the key-value backend stores the state document.
    #[serde(default = "default_kv_key")]
    pub kv_key: String,

    /// Maximum total bytes the key-value backend accepts.
    #[serde(default = "default_kv_quota_bytes")]
    pub kv_quota_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendChoice::default(),
            data_dir: String::new(),
            file_name: default_file_name(),
            kv_key: default_kv_key(),
            kv_quota_bytes: default_kv_quota_bytes(),
        }
    }
}

impl StorageConfig {
    /// Resolve the data directory, falling back to `./.filemap` when the
    /// platform has no data dir.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        if !self.data_dir.is_empty() {
            return PathBuf::from(&self.data_dir);
        }
        dirs::data_dir().map_or_else(|| PathBuf::from(".filemap"), |p| p.join("filemap"))
    }

    /// Full path of the state file.
    #[must_use]
    pub fn state_file_path(&self) -> PathBuf {
        self.resolved_data_dir().join(&self.file_name)
    }

    /// Directory backing the key-value store.
    #[must_use]
    pub fn kv_dir(&self) -> PathBuf {
        self.resolved_data_dir().join("kv")
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty file name or key, or a
    /// zero quota.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.file_name".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.kv_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.kv_key".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.kv_quota_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.kv_quota_bytes".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
