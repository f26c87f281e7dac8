use std::path::Path;

use anyhow::{Context, bail};
use fm_state::Action;
use fm_storage::transfer::read_import;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `filemap import`. The backup replaces all current data.
pub fn handle(args: &ImportArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !args.yes {
        bail!(
            "import replaces all {} project(s) with the backup; re-run with --yes to confirm",
            ctx.store.state().projects.len()
        );
    }
    let imported = read_import(Path::new(&args.path))
        .with_context(|| format!("failed to import {}", args.path))?;
    let projects = imported.projects.len();
    ctx.apply(Action::load(imported))?;
    output(&json!({ "imported": args.path, "projects": projects }), flags.format)
}
