//! Load/save of the whole application state with change detection.

use std::sync::{Mutex, MutexGuard, PoisonError};

use fm_core::state::AppState;
use fm_state::migration;
use tracing::{debug, info, warn};

use crate::backend::StorageBackend;
use crate::error::StorageError;

/// Result of a change-detecting save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    /// Serialized form matched the last successful write; nothing was written.
    Unchanged,
    Failed,
}

/// Persists [`AppState`] through a backend.
///
/// The serialized form of the last successful write (or of the loaded state)
/// is kept as the change-detection baseline. All methods take `&self` so one
/// gateway can be shared between the command path and the autosaver.
pub struct Gateway<B = Box<dyn StorageBackend>> {
    backend: B,
    last_written: Mutex<Option<String>>,
}

/// The on-disk form: pretty JSON with two-space indentation.
///
/// # Errors
///
/// Returns `StorageError::Serialize` if serialization fails.
pub fn serialize_state(state: &AppState) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(state)?)
}

impl<B: StorageBackend> Gateway<B> {
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            last_written: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    /// Load, migrate, and type the stored state.
    ///
    /// Never fails: a missing document, a read error, or unparsable content
    /// all yield the empty default state. The loaded state becomes the
    /// change-detection baseline.
    pub fn load(&self) -> AppState {
        let state = match self.read_state() {
            Ok(Some(state)) => {
                info!(
                    backend = %self.backend.describe(),
                    projects = state.projects.len(),
                    "state loaded"
                );
                state
            }
            Ok(None) => {
                info!(backend = %self.backend.describe(), "no saved state, starting empty");
                AppState::default()
            }
            Err(error) => {
                warn!(backend = %self.backend.describe(), %error, "saved state unreadable, starting empty");
                AppState::default()
            }
        };
        match serialize_state(&state) {
            Ok(text) => self.set_baseline(Some(text)),
            Err(error) => warn!(%error, "could not seed change detection"),
        }
        state
    }

    fn read_state(&self) -> Result<Option<AppState>, StorageError> {
        let Some(text) = self.backend.read()? else {
            return Ok(None);
        };
        let document: serde_json::Value = serde_json::from_str(&text)?;
        let state = migration::into_state(document)
            .map_err(|e| StorageError::Import(e.to_string()))?;
        Ok(Some(state))
    }

    /// Forced save, bypassing change detection.
    ///
    /// Returns `false` on failure; the error is logged, never raised.
    pub fn save(&self, state: &AppState) -> bool {
        let result = serialize_state(state).and_then(|text| {
            let mut baseline = self.baseline();
            self.write_text(&mut baseline, text)
        });
        match result {
            Ok(()) => true,
            Err(error) => {
                warn!(backend = %self.backend.describe(), %error, "save failed");
                false
            }
        }
    }

    /// Save only if the serialized state differs from the last write.
    pub fn save_if_changed(&self, state: &AppState) -> SaveOutcome {
        let text = match serialize_state(state) {
            Ok(text) => text,
            Err(error) => {
                warn!(%error, "state could not be serialized");
                return SaveOutcome::Failed;
            }
        };
        let mut baseline = self.baseline();
        if baseline.as_deref() == Some(text.as_str()) {
            debug!("state unchanged, skipping save");
            return SaveOutcome::Unchanged;
        }
        match self.write_text(&mut baseline, text) {
            Ok(()) => SaveOutcome::Written,
            Err(error) => {
                warn!(backend = %self.backend.describe(), %error, "autosave failed");
                SaveOutcome::Failed
            }
        }
    }

    /// Write while holding the baseline lock, so the baseline always
    /// matches the document last written.
    fn write_text(
        &self,
        baseline: &mut MutexGuard<'_, Option<String>>,
        text: String,
    ) -> Result<(), StorageError> {
        self.backend.write(&text)?;
        info!(backend = %self.backend.describe(), bytes = text.len(), "state saved");
        **baseline = Some(text);
        Ok(())
    }

    fn baseline(&self) -> MutexGuard<'_, Option<String>> {
        self.last_written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn set_baseline(&self, text: Option<String>) {
        *self.baseline() = text;
    }
}
