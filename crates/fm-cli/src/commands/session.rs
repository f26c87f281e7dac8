//! Interactive session: one in-memory store, many commands, autosave running.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::bail;
use clap::Parser;
use fm_storage::{Autosaver, ExitSave};
use tokio::sync::mpsc;

use crate::cli::{Cli, Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// What one input line asks for.
#[derive(Debug)]
enum Step {
    Skip,
    Quit,
    Run(Box<Cli>),
    Invalid(String),
}

/// Split a line into words. Single or double quotes group words; a
/// backslash escapes the next character outside single quotes.
fn split_words(line: &str) -> anyhow::Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => match chars.next() {
                Some(escaped) => {
                    current.push(escaped);
                    in_word = true;
                }
                None => bail!("trailing backslash"),
            },
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(ch);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quote.is_some() {
        bail!("unterminated quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn interpret(line: &str) -> Step {
    let words = match split_words(line) {
        Ok(words) => words,
        Err(error) => return Step::Invalid(error.to_string()),
    };
    match words.first().map(String::as_str) {
        None => Step::Skip,
        Some("quit" | "exit") => Step::Quit,
        Some(_) => match Cli::try_parse_from(std::iter::once("filemap".to_string()).chain(words)) {
            Ok(cli) => Step::Run(Box::new(cli)),
            Err(error) => Step::Invalid(error.render().to_string()),
        },
    }
}

/// Session flags apply unless the line overrides them.
fn merge_flags(session: &GlobalFlags, line: &GlobalFlags) -> GlobalFlags {
    GlobalFlags {
        format: session.format,
        limit: line.limit.or(session.limit),
        quiet: session.quiet || line.quiet,
        verbose: session.verbose,
        project: line.project.clone().or_else(|| session.project.clone()),
    }
}

fn run_command(cli: Cli, ctx: &mut AppContext, session_flags: &GlobalFlags) -> anyhow::Result<()> {
    let flags = merge_flags(session_flags, &cli.global_flags());
    match cli.command {
        Commands::Schema(args) => commands::schema::handle(&args, &flags),
        Commands::File { action } => commands::file::handle(&action, &flags),
        command => commands::dispatch::dispatch(command, ctx, &flags),
    }
}

/// Read stdin on a plain thread so a pending read never holds up runtime
/// shutdown.
fn spawn_line_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Handle `filemap session`. Ends on `quit`, end of input, or Ctrl-C, each
/// followed by a forced save bounded by the configured grace window.
pub async fn run(mut ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let saver = Autosaver::start(
        Arc::clone(&ctx.gateway),
        ctx.store.subscribe(),
        &ctx.config.autosave,
    );
    if !flags.quiet {
        eprintln!(
            "filemap session ({}); type a command without `filemap`, `quit` to leave",
            ctx.gateway.describe()
        );
    }

    let mut lines = spawn_line_reader();
    loop {
        let line = tokio::select! {
            line = lines.recv() => line,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };

        match interpret(&line) {
            Step::Skip => {}
            Step::Quit => break,
            Step::Invalid(message) => eprintln!("{}", message.trim_end()),
            Step::Run(cli) => {
                if let Err(error) = run_command(*cli, &mut ctx, flags) {
                    eprintln!("error: {error:#}");
                }
            }
        }
    }

    match saver.shutdown().await {
        ExitSave::Saved => {
            if !flags.quiet {
                eprintln!("saved to {}", ctx.gateway.describe());
            }
            Ok(())
        }
        ExitSave::Failed => bail!("final save to {} failed", ctx.gateway.describe()),
        ExitSave::TimedOut => bail!(
            "final save to {} did not finish within {:?}",
            ctx.gateway.describe(),
            ctx.config.autosave.exit_grace()
        ),
    }
}
