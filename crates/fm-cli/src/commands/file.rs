use anyhow::bail;
use fm_bridge::{HostBridge, PresetPicker};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FileCommands;
use crate::output::output;

/// Handle `filemap file`.
pub fn handle(action: &FileCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    let bridge = HostBridge::new(PresetPicker::cancelled());
    match action {
        FileCommands::Open { path } => {
            if !bridge.open_file(path) {
                bail!("could not open {path}");
            }
            output(&json!({ "opened": path }), flags.format)
        }
        FileCommands::Info { path } => match bridge.get_file_info(path) {
            Some(info) => output(&json!({ "file": info }), flags.format),
            None => bail!("no such file or folder: {path}"),
        },
        FileCommands::Validate { path } => output(
            &json!({ "path": path, "exists": bridge.validate_file(path) }),
            flags.format,
        ),
    }
}
