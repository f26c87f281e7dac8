//! Single owner of the live application state.

use fm_core::state::AppState;
use tokio::sync::watch;
use tracing::debug;

use crate::action::Action;
use crate::error::StateError;
use crate::reducer::apply;

/// Owns the state and funnels every mutation through [`AppStore::dispatch`].
///
/// Each successful dispatch publishes a snapshot on a watch channel, so an
/// autosaver always sees the latest state without holding a borrow.
pub struct AppStore {
    state: AppState,
    snapshots: watch::Sender<AppState>,
}

impl AppStore {
    #[must_use]
    pub fn new(initial: AppState) -> Self {
        let (snapshots, _) = watch::channel(initial.clone());
        Self {
            state: initial,
            snapshots,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply `action` and publish the new state.
    ///
    /// # Errors
    ///
    /// Returns `StateError::NotFound` if the action addresses a missing
    /// entity. Nothing is published in that case.
    pub fn dispatch(&mut self, action: Action) -> Result<(), StateError> {
        let name = action.name();
        apply(&mut self.state, action)?;
        debug!(action = name, "dispatched");
        self.snapshots.send_replace(self.state.clone());
        Ok(())
    }

    /// Receiver that always holds the most recent state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.snapshots.subscribe()
    }

    #[must_use]
    pub fn into_state(self) -> AppState {
        self.state
    }
}
