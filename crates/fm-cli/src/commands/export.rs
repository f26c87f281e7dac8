use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use fm_storage::transfer::write_export;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `filemap export`.
pub fn handle(args: &ExportArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let target = match &args.out {
        Some(out) => PathBuf::from(out),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let state = ctx.store.state();
    let path = write_export(state, &target, Utc::now())
        .with_context(|| format!("failed to export to {}", target.display()))?;
    output(
        &json!({ "path": path, "projects": state.projects.len() }),
        flags.format,
    )
}
