use clap::Subcommand;

/// Project-level property commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PropertyCommands {
    /// Add a property.
    Add {
        #[arg(long)]
        name: String,
        /// notes, protocol, raw-data, results, custom, folder
        #[arg(long)]
        kind: String,
        /// Label for `custom` properties.
        #[arg(long)]
        custom_type: Option<String>,
    },
    /// Replace a property's name, kind, or custom label.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        custom_type: Option<String>,
    },
    /// Delete a property and every binding to it.
    Delete { id: String },
}
