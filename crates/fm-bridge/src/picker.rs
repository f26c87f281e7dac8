//! Path pickers.

use std::path::PathBuf;

/// Chooses a path for a binding. `None` means the user cancelled.
pub trait PathPicker {
    fn pick_file(&mut self) -> Option<PathBuf>;
    fn pick_folder(&mut self) -> Option<PathBuf>;
}

/// Answers every pick with a path fixed up front.
#[derive(Debug, Clone, Default)]
pub struct PresetPicker {
    path: Option<PathBuf>,
}

impl PresetPicker {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A picker that always cancels.
    #[must_use]
    pub const fn cancelled() -> Self {
        Self { path: None }
    }
}

impl PathPicker for PresetPicker {
    fn pick_file(&mut self) -> Option<PathBuf> {
        self.path.clone()
    }

    fn pick_folder(&mut self) -> Option<PathBuf> {
        self.path.clone()
    }
}
