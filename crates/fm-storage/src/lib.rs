//! # fm-storage
//!
//! Durable storage of the FileMap application state.
//!
//! The whole [`AppState`](fm_core::state::AppState) is persisted as one JSON
//! document through a [`Gateway`], which sits on top of a [`StorageBackend`]:
//!
//! - [`FileBackend`]: one state file, replaced atomically on every write.
//! - [`KeyValueBackend`]: one key in a [`KeyValueStore`] with a byte quota,
//!   either in memory ([`MemoryStore`]) or one file per key ([`DirStore`]).
//!
//! The gateway migrates on load, never fails a load (a missing or corrupt
//! document reads as the empty state), and skips writes whose serialized form
//! matches the last one written. [`Autosaver`] drives it on a timer.

pub mod autosave;
pub mod backend;
pub mod error;
pub mod file;
pub mod gateway;
pub mod kv;
pub mod select;
pub mod transfer;

pub use autosave::{Autosaver, ExitSave};
pub use backend::StorageBackend;
pub use error::StorageError;
pub use file::FileBackend;
pub use gateway::{Gateway, SaveOutcome};
pub use kv::{DirStore, KeyValueBackend, KeyValueStore, MemoryStore};
pub use select::open_gateway;
