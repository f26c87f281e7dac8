#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("filemap error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    // Commands that never touch stored state.
    match &cli.command {
        cli::Commands::Schema(args) => return commands::schema::handle(args, &flags),
        cli::Commands::File { action } => return commands::file::handle(action, &flags),
        _ => {}
    }

    let config = bootstrap::load_config()?;
    context::warn_unconfigured(&config);

    let mut ctx =
        context::AppContext::init(config).context("failed to initialize filemap state")?;

    let command = cli.command;
    if let cli::Commands::Session = command {
        return commands::session::run(ctx, &flags).await;
    }

    let mutates = command_mutates_state(&command);
    let result = commands::dispatch::dispatch(command, &mut ctx, &flags);
    if mutates && result.is_ok() {
        ctx.persist(&flags);
    }
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("FILEMAP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Whether a one-shot command changes state and must be saved afterwards.
pub(crate) fn command_mutates_state(command: &cli::Commands) -> bool {
    use crate::cli::subcommands::{
        AnimalCommands, AnimalPropertyCommands, ExperimentCommands, ProjectCommands,
    };

    match command {
        cli::Commands::Project { action } => !matches!(
            action,
            ProjectCommands::List | ProjectCommands::Get { .. } | ProjectCommands::Search { .. }
        ),
        cli::Commands::Experiment { action } => !matches!(
            action,
            ExperimentCommands::List | ExperimentCommands::Search { .. }
        ),
        cli::Commands::Animal { action } => !matches!(action, AnimalCommands::List { .. }),
        cli::Commands::AnimalProperty { action } => {
            !matches!(action, AnimalPropertyCommands::List)
        }
        cli::Commands::Property { .. } | cli::Commands::Bind(_) | cli::Commands::Import(_) => {
            true
        }
        // `save` writes on its own, unconditionally.
        cli::Commands::Save
        | cli::Commands::Export(_)
        | cli::Commands::Schema(_)
        | cli::Commands::File { .. }
        | cli::Commands::Session => false,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::command_mutates_state;
    use crate::cli::Cli;

    fn mutates(args: &[&str]) -> bool {
        let mut argv = vec!["filemap"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).expect("cli should parse");
        command_mutates_state(&cli.command)
    }

    #[test]
    fn reads_are_not_saved() {
        assert!(!mutates(&["project", "list"]));
        assert!(!mutates(&["project", "search", "lab"]));
        assert!(!mutates(&["experiment", "list"]));
        assert!(!mutates(&["animal", "list"]));
        assert!(!mutates(&["animal-property", "list"]));
        assert!(!mutates(&["export"]));
    }

    #[test]
    fn writes_are_saved() {
        assert!(mutates(&["project", "create", "--name", "Lab1"]));
        assert!(mutates(&["project", "select", "prj-1"]));
        assert!(mutates(&["animal-property", "apply"]));
        assert!(mutates(&["import", "backup.json", "--yes"]));
        assert!(mutates(&["animal", "display", "ani-1", "name"]));
        assert!(mutates(&[
            "bind",
            "--experiment",
            "exp-1",
            "--property",
            "prp-1",
            "--path",
            "/tmp/a.csv"
        ]));
    }
}
