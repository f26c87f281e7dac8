use anyhow::Context;
use fm_bridge::{HostBridge, PresetPicker};
use fm_core::entities::ExperimentProperty;
use fm_state::Action;
use fm_state::queries;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BindArgs;
use crate::context::AppContext;
use crate::output::output;

/// Build the binding for `property_id` from a picker. `None` means the pick
/// was cancelled.
pub fn pick_binding(
    bridge: &mut HostBridge<PresetPicker>,
    property_id: &str,
    folder: bool,
) -> Option<ExperimentProperty> {
    let empty = ExperimentProperty {
        property_id: property_id.to_string(),
        file_path: None,
        file_name: None,
        folder_path: None,
    };
    if folder {
        let picked = bridge.select_folder()?;
        Some(ExperimentProperty {
            folder_path: Some(picked.folder_path),
            ..empty
        })
    } else {
        let picked = bridge.select_file()?;
        Some(ExperimentProperty {
            file_path: Some(picked.file_path),
            file_name: Some(picked.file_name),
            ..empty
        })
    }
}

/// Handle `filemap bind`.
pub fn handle(args: &BindArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project_id = ctx.project_id(flags)?;
    let state = ctx.store.state();
    let property = queries::property(state, &project_id, &args.property)
        .with_context(|| format!("property not found: {}", args.property))?;
    queries::experiment(state, &project_id, &args.experiment)
        .with_context(|| format!("experiment not found: {}", args.experiment))?;

    let picker = match (&args.path, args.clear) {
        (Some(path), false) => PresetPicker::new(path),
        _ => PresetPicker::cancelled(),
    };
    let mut bridge = HostBridge::new(picker);
    let folder = property.kind.binds_folder();

    let binding = if args.clear {
        ExperimentProperty {
            property_id: args.property.clone(),
            file_path: None,
            file_name: None,
            folder_path: None,
        }
    } else {
        let binding = pick_binding(&mut bridge, &args.property, folder)
            .context("nothing to bind; pass --path or --clear")?;
        let target = binding
            .folder_path
            .as_deref()
            .or(binding.file_path.as_deref())
            .unwrap_or_default();
        if !bridge.validate_file(target) {
            tracing::warn!(path = target, "bound path does not exist yet");
        }
        binding
    };

    ctx.apply(Action::UpdateExperimentProperty {
        project_id,
        experiment_id: args.experiment.clone(),
        binding: binding.clone(),
    })?;
    output(&json!({ "experiment": args.experiment, "binding": binding }), flags.format)
}

#[cfg(test)]
mod tests {
    use fm_bridge::{HostBridge, PresetPicker};
    use pretty_assertions::assert_eq;

    use super::pick_binding;

    #[test]
    fn file_binding_carries_name() {
        let mut bridge = HostBridge::new(PresetPicker::new("/data/lab/protocol.pdf"));
        let binding = pick_binding(&mut bridge, "prp-1", false).unwrap();
        assert_eq!(binding.file_path.as_deref(), Some("/data/lab/protocol.pdf"));
        assert_eq!(binding.file_name.as_deref(), Some("protocol.pdf"));
        assert!(binding.folder_path.is_none());
    }

    #[test]
    fn folder_binding_sets_only_folder() {
        let mut bridge = HostBridge::new(PresetPicker::new("/data/lab/run1"));
        let binding = pick_binding(&mut bridge, "prp-2", true).unwrap();
        assert_eq!(binding.folder_path.as_deref(), Some("/data/lab/run1"));
        assert!(binding.file_path.is_none());
    }

    #[test]
    fn cancelled_pick_binds_nothing() {
        let mut bridge = HostBridge::new(PresetPicker::cancelled());
        assert!(pick_binding(&mut bridge, "prp-1", false).is_none());
    }
}
