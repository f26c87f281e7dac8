//! The storage-provider seam.

use crate::error::StorageError;

/// Raw document storage: one serialized state document, read and written
/// whole.
pub trait StorageBackend: Send + Sync {
    /// The stored document, or `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the underlying store cannot be read.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on I/O failure or when a quota is exceeded.
    fn write(&self, contents: &str) -> Result<(), StorageError>;

    /// Human-readable location, for logs and `filemap save` output.
    fn describe(&self) -> String;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn read(&self) -> Result<Option<String>, StorageError> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        (**self).write(contents)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
