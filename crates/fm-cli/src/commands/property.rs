use anyhow::{Context, bail};
use fm_core::entities::Property;
use fm_core::enums::PropertyKind;
use fm_core::ids::{PREFIX_PROPERTY, generate_id};
use fm_state::Action;
use fm_state::queries;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PropertyCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// A custom label only makes sense on `custom` properties.
fn check_custom_type(kind: PropertyKind, custom_type: Option<&String>) -> anyhow::Result<()> {
    if custom_type.is_some() && kind != PropertyKind::Custom {
        bail!("--custom-type requires kind 'custom' (got '{kind}')");
    }
    Ok(())
}

/// Handle `filemap property`.
pub fn handle(
    action: &PropertyCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project_id = ctx.project_id(flags)?;

    match action {
        PropertyCommands::Add {
            name,
            kind,
            custom_type,
        } => {
            let kind = parse_enum::<PropertyKind>(kind, "kind")?;
            check_custom_type(kind, custom_type.as_ref())?;
            let property = Property {
                id: generate_id(PREFIX_PROPERTY)?,
                name: name.clone(),
                kind,
                custom_type: custom_type.clone(),
            };
            ctx.apply(Action::AddProperty {
                project_id,
                property: property.clone(),
            })?;
            output(&json!({ "property": property }), flags.format)
        }
        PropertyCommands::Update {
            id,
            name,
            kind,
            custom_type,
        } => {
            let mut property = queries::property(ctx.store.state(), &project_id, id)
                .with_context(|| format!("property not found: {id}"))?
                .clone();
            if let Some(name) = name {
                property.name.clone_from(name);
            }
            if let Some(kind) = kind {
                property.kind = parse_enum(kind, "kind")?;
            }
            if custom_type.is_some() {
                property.custom_type.clone_from(custom_type);
            }
            if property.kind != PropertyKind::Custom {
                property.custom_type = None;
            }
            ctx.apply(Action::UpdateProperty {
                project_id,
                property: property.clone(),
            })?;
            output(&json!({ "property": property }), flags.format)
        }
        PropertyCommands::Delete { id } => {
            ctx.apply(Action::DeleteProperty {
                project_id,
                property_id: id.clone(),
            })?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use fm_core::enums::PropertyKind;

    use super::check_custom_type;

    #[test]
    fn custom_label_needs_custom_kind() {
        let label = "Imaging".to_string();
        assert!(check_custom_type(PropertyKind::Custom, Some(&label)).is_ok());
        assert!(check_custom_type(PropertyKind::Notes, Some(&label)).is_err());
        assert!(check_custom_type(PropertyKind::Notes, None).is_ok());
    }
}
