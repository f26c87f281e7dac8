//! Periodic and forced saving of the live state.
//!
//! The autosaver watches the store's snapshot channel. Every tick it hands the
//! latest snapshot to [`Gateway::save_if_changed`]; [`Autosaver::save_now`]
//! and [`Autosaver::shutdown`] force a write. Each save works on a snapshot
//! taken when it starts, so a mutation made during a save is picked up by the
//! next one. Failed saves are not retried.

use std::sync::Arc;
use std::time::Duration;

use fm_config::AutosaveConfig;
use fm_core::state::AppState;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::backend::StorageBackend;
use crate::gateway::{Gateway, SaveOutcome};

/// How the exit save ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSave {
    Saved,
    Failed,
    /// The grace window elapsed first; the write may or may not land.
    TimedOut,
}

pub struct Autosaver<B: StorageBackend + 'static = Box<dyn StorageBackend>> {
    gateway: Arc<Gateway<B>>,
    snapshots: watch::Receiver<AppState>,
    exit_grace: Duration,
    ticker: Option<(oneshot::Sender<()>, JoinHandle<()>)>,
}

impl<B: StorageBackend + 'static> Autosaver<B> {
    /// Start autosaving. With `config.enabled == false` no ticker runs, but
    /// [`Self::save_now`] and [`Self::shutdown`] still work.
    #[must_use]
    pub fn start(
        gateway: Arc<Gateway<B>>,
        snapshots: watch::Receiver<AppState>,
        config: &AutosaveConfig,
    ) -> Self {
        let interval = config.enabled.then(|| config.interval());
        Self::with_timing(gateway, snapshots, interval, config.exit_grace())
    }

    /// Start with explicit timings. `interval == None` disables the ticker.
    #[must_use]
    pub fn with_timing(
        gateway: Arc<Gateway<B>>,
        snapshots: watch::Receiver<AppState>,
        interval: Option<Duration>,
        exit_grace: Duration,
    ) -> Self {
        let ticker = interval.map(|period| {
            let (stop_tx, stop_rx) = oneshot::channel();
            let handle = tokio::spawn(tick_loop(
                Arc::clone(&gateway),
                snapshots.clone(),
                period,
                stop_rx,
            ));
            info!(?period, "autosave started");
            (stop_tx, handle)
        });
        Self {
            gateway,
            snapshots,
            exit_grace,
            ticker,
        }
    }

    /// Write the current snapshot now, regardless of change detection.
    pub async fn save_now(&self) -> bool {
        let state = self.snapshots.borrow().clone();
        let gateway = Arc::clone(&self.gateway);
        tokio::task::spawn_blocking(move || gateway.save(&state))
            .await
            .unwrap_or_else(|error| {
                warn!(%error, "save task failed");
                false
            })
    }

    /// Stop the ticker, then force a final save bounded by the exit grace
    /// window.
    pub async fn shutdown(mut self) -> ExitSave {
        if let Some((stop, handle)) = self.ticker.take() {
            let _ = stop.send(());
            if let Err(error) = handle.await {
                warn!(%error, "autosave ticker ended abnormally");
            }
        }

        let state = self.snapshots.borrow().clone();
        let gateway = Arc::clone(&self.gateway);
        let save = tokio::task::spawn_blocking(move || gateway.save(&state));
        let outcome = match tokio::time::timeout(self.exit_grace, save).await {
            Ok(Ok(true)) => ExitSave::Saved,
            Ok(Ok(false)) => ExitSave::Failed,
            Ok(Err(error)) => {
                warn!(%error, "exit save task failed");
                ExitSave::Failed
            }
            Err(_) => {
                warn!(grace = ?self.exit_grace, "exit save did not finish in time");
                ExitSave::TimedOut
            }
        };
        info!(?outcome, "autosave stopped");
        outcome
    }
}

async fn tick_loop<B: StorageBackend + 'static>(
    gateway: Arc<Gateway<B>>,
    snapshots: watch::Receiver<AppState>,
    period: Duration,
    mut stop: oneshot::Receiver<()>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the state was just loaded.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = &mut stop => break,
            _ = interval.tick() => {
                let state = snapshots.borrow().clone();
                let gateway = Arc::clone(&gateway);
                match tokio::task::spawn_blocking(move || gateway.save_if_changed(&state)).await {
                    Ok(SaveOutcome::Written) => debug!("autosave wrote state"),
                    Ok(SaveOutcome::Unchanged) => {}
                    Ok(SaveOutcome::Failed) => warn!("autosave failed"),
                    Err(error) => warn!(%error, "autosave task failed"),
                }
            }
        }
    }
}
