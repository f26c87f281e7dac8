use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AnimalCommands, AnimalPropertyCommands, ExperimentCommands, FileCommands, ProjectCommands,
    PropertyCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Experiments of the selected project.
    Experiment {
        #[command(subcommand)]
        action: ExperimentCommands,
    },
    /// Project-level file properties shared by all experiments.
    Property {
        #[command(subcommand)]
        action: PropertyCommands,
    },
    /// Bind a file or folder to an experiment property.
    Bind(BindArgs),
    /// Animals and samples.
    Animal {
        #[command(subcommand)]
        action: AnimalCommands,
    },
    /// Animal field definitions.
    #[command(name = "animal-property")]
    AnimalProperty {
        #[command(subcommand)]
        action: AnimalPropertyCommands,
    },
    /// Open or inspect linked paths.
    File {
        #[command(subcommand)]
        action: FileCommands,
    },
    /// Write a backup of all data.
    Export(ExportArgs),
    /// Replace all data with a backup.
    Import(ImportArgs),
    /// Save the current state now.
    Save,
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
    /// Interactive session with autosave.
    Session,
}

/// Arguments for `filemap bind`.
#[derive(Clone, Debug, Args)]
pub struct BindArgs {
    #[arg(long)]
    pub experiment: String,
    #[arg(long)]
    pub property: String,
    /// File or folder to bind (folder for `folder` properties).
    #[arg(long, conflicts_with = "clear")]
    pub path: Option<String>,
    /// Remove the current binding.
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for `filemap export`.
#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Target file or directory (defaults to the current directory).
    #[arg(long, short = 'o')]
    pub out: Option<String>,
}

/// Arguments for `filemap import`.
#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    pub path: String,
    /// Confirm replacing all current data.
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for `filemap schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Registered type name (e.g. `app_state`, `export_bundle`).
    pub type_name: Option<String>,
}
