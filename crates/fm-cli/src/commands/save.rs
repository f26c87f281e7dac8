use anyhow::bail;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `filemap save`: a forced write of the loaded state.
pub fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !ctx.gateway.save(ctx.store.state()) {
        bail!("save to {} failed", ctx.gateway.describe());
    }
    output(
        &json!({ "saved": true, "backend": ctx.gateway.describe() }),
        flags.format,
    )
}
