use clap::Subcommand;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Make the new project the current selection.
        #[arg(long)]
        select: bool,
        /// Start without the default Notes, Protocol, and Raw Data properties.
        #[arg(long)]
        bare: bool,
    },
    /// List projects.
    List,
    /// Show a project (defaults to the selected one).
    Get { id: Option<String> },
    /// Update a project.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a project and everything in it.
    Delete { id: String },
    /// Select the current project.
    Select {
        #[arg(required_unless_present = "clear")]
        id: Option<String>,
        /// Clear the selection instead.
        #[arg(long)]
        clear: bool,
    },
    /// Search projects by name or description and experiment tags.
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        tag: Vec<String>,
    },
}
