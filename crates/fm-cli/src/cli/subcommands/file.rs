use clap::Subcommand;

/// Linked path commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FileCommands {
    /// Open a path in its default application.
    Open { path: String },
    /// Show size, extension, and modification time.
    Info { path: String },
    /// Check that a path exists.
    Validate { path: String },
}
