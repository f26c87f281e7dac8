//! The host bridge operations.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fm_core::host::{FileInfo, FileSelection, FolderSelection};
use tracing::{debug, warn};

use crate::error::BridgeError;
use crate::launcher::{Launcher, SystemLauncher};
use crate::picker::PathPicker;

pub struct HostBridge<P, L = SystemLauncher> {
    picker: P,
    launcher: L,
}

/// Last path component, or the whole path when it has none (`/`).
fn base_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

impl<P: PathPicker> HostBridge<P> {
    #[must_use]
    pub const fn new(picker: P) -> Self {
        Self {
            picker,
            launcher: SystemLauncher,
        }
    }
}

impl<P: PathPicker, L: Launcher> HostBridge<P, L> {
    #[must_use]
    pub const fn with_launcher(picker: P, launcher: L) -> Self {
        Self { picker, launcher }
    }

    #[must_use]
    pub const fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn select_file(&mut self) -> Option<FileSelection> {
        let path = self.picker.pick_file()?;
        Some(FileSelection {
            file_name: base_name(&path),
            file_path: path.display().to_string(),
        })
    }

    pub fn select_folder(&mut self) -> Option<FolderSelection> {
        let path = self.picker.pick_folder()?;
        Some(FolderSelection {
            folder_name: base_name(&path),
            folder_path: path.display().to_string(),
        })
    }

    /// Open `path` in its default application. If that fails, the containing
    /// folder is opened instead. A missing path is never launched.
    pub fn open_file(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.try_open(path) {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "could not open path");
                false
            }
        }
    }

    fn try_open(&self, path: &Path) -> Result<(), BridgeError> {
        if !path.exists() {
            return Err(BridgeError::Missing(path.to_path_buf()));
        }
        match self.launcher.launch(path) {
            Ok(()) => Ok(()),
            Err(error) => {
                let parent = path.parent().map_or_else(PathBuf::new, Path::to_path_buf);
                debug!(%error, parent = %parent.display(), "falling back to containing folder");
                self.launcher.launch(&parent)
            }
        }
    }

    #[must_use]
    pub fn validate_file(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref().exists()
    }

    /// Describe `path`; `None` when it does not exist or cannot be read.
    #[must_use]
    pub fn get_file_info(&self, path: impl AsRef<Path>) -> Option<FileInfo> {
        let path = path.as_ref();
        let meta = match std::fs::metadata(path) {
            Ok(meta) => meta,
            Err(error) => {
                debug!(path = %path.display(), %error, "no file info");
                return None;
            }
        };
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        let modified = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_default();
        Some(FileInfo {
            name: base_name(path),
            size: meta.len(),
            extension,
            modified,
            is_directory: meta.is_dir(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::PresetPicker;
    use pretty_assertions::assert_eq;

    #[test]
    fn cancelled_pick_yields_none() {
        let mut bridge = HostBridge::new(PresetPicker::cancelled());
        assert!(bridge.select_file().is_none());
        assert!(bridge.select_folder().is_none());
    }

    #[test]
    fn selection_splits_name_from_path() {
        let mut bridge = HostBridge::new(PresetPicker::new("/data/runs/trial1.csv"));
        let picked = bridge.select_file().unwrap();
        assert_eq!(picked.file_path, "/data/runs/trial1.csv");
        assert_eq!(picked.file_name, "trial1.csv");
    }

    #[test]
    fn root_folder_keeps_its_path_as_name() {
        assert_eq!(base_name(Path::new("/")), "/");
    }
}
