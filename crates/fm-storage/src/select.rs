//! Backend selection at startup.

use std::path::Path;

use fm_config::{BackendChoice, StorageConfig};
use tracing::{info, warn};

use crate::backend::StorageBackend;
use crate::error::StorageError;
use crate::file::FileBackend;
use crate::gateway::Gateway;
use crate::kv::{DirStore, KeyValueBackend, MemoryStore};

/// Whether files can be created in `dir`, creating it if needed.
fn is_writable(dir: &Path) -> bool {
    std::fs::create_dir_all(dir).is_ok() && tempfile::NamedTempFile::new_in(dir).is_ok()
}

/// Open the gateway the configuration asks for.
///
/// With `auto`, the state file is used when the data directory is writable;
/// otherwise state lives in an in-memory key-value store for this process
/// only, and a warning is logged.
///
/// # Errors
///
/// Returns `StorageError::Io` if an explicitly chosen key-value directory
/// cannot be created.
pub fn open_gateway(config: &StorageConfig) -> Result<Gateway, StorageError> {
    let backend: Box<dyn StorageBackend> = match config.backend {
        BackendChoice::File => Box::new(FileBackend::new(config.state_file_path())),
        BackendChoice::KeyValue => {
            let store = DirStore::open(config.kv_dir(), config.kv_quota_bytes)?;
            Box::new(KeyValueBackend::new(store, config.kv_key.clone()))
        }
        BackendChoice::Auto => {
            let dir = config.resolved_data_dir();
            if is_writable(&dir) {
                Box::new(FileBackend::new(config.state_file_path()))
            } else {
                warn!(
                    dir = %dir.display(),
                    "data directory not writable, state will not outlive this process"
                );
                Box::new(KeyValueBackend::new(
                    MemoryStore::new(config.kv_quota_bytes),
                    config.kv_key.clone(),
                ))
            }
        }
    };
    info!(backend = %backend.describe(), "storage backend selected");
    Ok(Gateway::new(backend))
}
