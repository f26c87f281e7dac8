//! Opening paths in their default application.

use std::path::Path;

use crate::error::BridgeError;

pub trait Launcher {
    /// # Errors
    ///
    /// Returns `BridgeError::Launch` if the platform opener fails.
    fn launch(&self, path: &Path) -> Result<(), BridgeError>;
}

/// Uses the platform opener (`xdg-open`, `open`, `start`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, path: &Path) -> Result<(), BridgeError> {
        open::that(path).map_err(|source| BridgeError::Launch {
            path: path.to_path_buf(),
            source,
        })
    }
}
