//! Key-value backend with a byte quota.
//!
//! Mirrors the browser-storage mode of the desktop app: the state document
//! lives under one fixed key, and the store rejects writes that would push
//! its total size over the quota. A rejected write leaves the previous value
//! in place.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::backend::StorageBackend;
use crate::error::StorageError;
use crate::file::write_atomic;

/// Minimal string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::QuotaExceeded` if the new total would exceed the
    /// quota, or another `StorageError` on I/O failure.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on I/O failure.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    fn describe(&self) -> String;
}

/// Bytes charged for one entry.
fn entry_size(key: &str, value: &str) -> u64 {
    (key.len() + value.len()) as u64
}

fn check_quota(needed: u64, quota: u64) -> Result<(), StorageError> {
    if needed > quota {
        return Err(StorageError::QuotaExceeded { needed, quota });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store. Contents are lost when the process exits.
#[derive(Debug)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: u64,
}

impl MemoryStore {
    #[must_use]
    pub fn new(quota: u64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let others: u64 = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| entry_size(k, v))
            .sum();
        check_quota(others + entry_size(key, value), self.quota)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}

// ---------------------------------------------------------------------------
// DirStore
// ---------------------------------------------------------------------------

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
    quota: u64,
}

impl DirStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>, quota: u64) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        Ok(Self { dir, quota })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys map to file names with anything outside `[A-Za-z0-9._-]` replaced.
    fn key_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }

    fn used_bytes_excluding(&self, exclude: &Path) -> Result<u64, StorageError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        let mut total = 0;
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&self.dir, e))?;
            let path = entry.path();
            if path == exclude || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let meta = entry.metadata().map_err(|e| StorageError::io(&path, e))?;
            let stem_len = path.file_stem().map_or(0, |s| s.len() as u64);
            total += stem_len + meta.len();
        }
        Ok(total)
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.key_path(key);
        let others = self.used_bytes_excluding(&path)?;
        check_quota(others + entry_size(key, value), self.quota)?;
        write_atomic(&path, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.key_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn describe(&self) -> String {
        format!("key-value dir {}", self.dir.display())
    }
}

// ---------------------------------------------------------------------------
// KeyValueBackend
// ---------------------------------------------------------------------------

/// Stores the state document under one fixed key.
#[derive(Debug)]
pub struct KeyValueBackend<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KeyValueBackend<S> {
    #[must_use]
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> StorageBackend for KeyValueBackend<S> {
    fn read(&self) -> Result<Option<String>, StorageError> {
        self.store.get(&self.key)
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        self.store.set(&self.key, contents)
    }

    fn describe(&self) -> String {
        format!("{} (key {})", self.store.describe(), self.key)
    }
}
