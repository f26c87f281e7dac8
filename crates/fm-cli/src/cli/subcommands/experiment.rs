use clap::Subcommand;

/// Experiment commands. All act on the selected project.
#[derive(Clone, Debug, Subcommand)]
pub enum ExperimentCommands {
    /// Create an experiment.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        tag: Vec<String>,
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,
    },
    /// List experiments.
    List,
    /// Update an experiment.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Replace all tags.
        #[arg(long)]
        tag: Option<Vec<String>>,
        #[arg(long, conflicts_with = "clear_start")]
        start: Option<String>,
        #[arg(long, conflicts_with = "clear_end")]
        end: Option<String>,
        #[arg(long)]
        clear_start: bool,
        #[arg(long)]
        clear_end: bool,
    },
    /// Delete an experiment.
    Delete { id: String },
    /// Search experiments by name or description and tags.
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        tag: Vec<String>,
    },
}
