use anyhow::bail;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Project { action } => commands::project::handle(&action, ctx, flags),
        Commands::Experiment { action } => commands::experiment::handle(&action, ctx, flags),
        Commands::Property { action } => commands::property::handle(&action, ctx, flags),
        Commands::Bind(args) => commands::bind::handle(&args, ctx, flags),
        Commands::Animal { action } => commands::animal::handle(&action, ctx, flags),
        Commands::AnimalProperty { action } => {
            commands::animal_property::handle(&action, ctx, flags)
        }
        Commands::Export(args) => commands::export::handle(&args, ctx, flags),
        Commands::Import(args) => commands::import::handle(&args, ctx, flags),
        Commands::Save => commands::save::handle(ctx, flags),
        Commands::Schema(args) => commands::schema::handle(&args, flags),
        Commands::File { action } => commands::file::handle(&action, flags),
        Commands::Session => bail!("a session is already running"),
    }
}
