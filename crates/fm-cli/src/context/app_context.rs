use std::sync::Arc;

use anyhow::Context;
use fm_config::FmConfig;
use fm_core::entities::Project;
use fm_state::{Action, AppStore};
use fm_storage::{Gateway, SaveOutcome, open_gateway};

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: FmConfig,
    pub gateway: Arc<Gateway>,
    pub store: AppStore,
}

impl AppContext {
    /// Open the configured storage backend and load the saved state.
    pub fn init(config: FmConfig) -> anyhow::Result<Self> {
        let gateway = open_gateway(&config.storage).context("failed to open storage backend")?;
        let store = AppStore::new(gateway.load());
        Ok(Self {
            config,
            gateway: Arc::new(gateway),
            store,
        })
    }

    /// Apply one mutation to the in-memory state.
    pub fn apply(&mut self, action: Action) -> anyhow::Result<()> {
        self.store.dispatch(action).map_err(anyhow::Error::from)
    }

    /// The project commands act on: `--project` if given, else the selection.
    pub fn project_id(&self, flags: &GlobalFlags) -> anyhow::Result<String> {
        if let Some(id) = &flags.project {
            return Ok(id.clone());
        }
        self.store
            .state()
            .current_project_id
            .clone()
            .context("no project selected; run `filemap project select <id>` or pass --project")
    }

    pub fn project(&self, flags: &GlobalFlags) -> anyhow::Result<&Project> {
        let id = self.project_id(flags)?;
        self.store
            .state()
            .project(&id)
            .with_context(|| format!("project not found: {id}"))
    }

    /// Save after a one-shot command. Failures are reported, not raised.
    pub fn persist(&self, flags: &GlobalFlags) {
        if self.gateway.save_if_changed(self.store.state()) == SaveOutcome::Failed && !flags.quiet {
            eprintln!(
                "warning: changes could not be saved to {}",
                self.gateway.describe()
            );
        }
    }
}
