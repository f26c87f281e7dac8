use anyhow::{Context, bail};
use fm_core::builtins::{effective_animal_properties, is_built_in};
use fm_core::entities::ProjectAnimalProperty;
use fm_core::enums::{AppliesTo, FieldKind};
use fm_core::ids::{PREFIX_FIELD_DEF, generate_id};
use fm_state::Action;
use fm_state::updates::AnimalPropertyDefUpdateBuilder;
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AnimalPropertyCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DefinitionRow<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    kind: FieldKind,
    required: bool,
    default: Option<&'a str>,
    options: &'a [String],
    order: i32,
    applies_to: AppliesTo,
    custom: bool,
}

impl<'a> From<&'a ProjectAnimalProperty> for DefinitionRow<'a> {
    fn from(def: &'a ProjectAnimalProperty) -> Self {
        Self {
            id: &def.id,
            name: &def.name,
            kind: def.kind,
            required: def.required,
            default: def.default_value.as_deref(),
            options: &def.options,
            order: def.order,
            applies_to: def.applies_to,
            custom: def.is_custom,
        }
    }
}

/// Select fields need choices, and a default must itself be valid.
fn check_definition(def: &ProjectAnimalProperty) -> anyhow::Result<()> {
    if def.kind == FieldKind::Select && def.options.is_empty() {
        bail!("select field '{}' needs at least one --option", def.name);
    }
    if let Some(default) = &def.default_value {
        def.validate_value(default)
            .with_context(|| format!("invalid default for '{}'", def.name))?;
    }
    Ok(())
}

/// Next `order` after every effective definition.
fn next_order(defs: &[ProjectAnimalProperty]) -> i32 {
    defs.iter().map(|d| d.order).max().map_or(0, |max| max.max(-1) + 1)
}

/// Handle `filemap animal-property`.
pub fn handle(
    action: &AnimalPropertyCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project_id = ctx.project_id(flags)?;

    match action {
        AnimalPropertyCommands::Add {
            name,
            kind,
            required,
            default,
            option,
            order,
            applies_to,
        } => {
            let effective = effective_animal_properties(ctx.project(flags)?);
            if effective.iter().any(|d| d.name.eq_ignore_ascii_case(name)) {
                bail!("an animal field named '{name}' already exists");
            }
            let def = ProjectAnimalProperty {
                id: generate_id(PREFIX_FIELD_DEF)?,
                name: name.clone(),
                kind: parse_enum(kind, "kind")?,
                required: *required,
                default_value: default.clone(),
                options: option.clone(),
                is_custom: true,
                order: order.unwrap_or_else(|| next_order(&effective)),
                applies_to: parse_enum(applies_to, "applies-to")?,
            };
            check_definition(&def)?;
            ctx.apply(Action::AddAnimalProperty {
                project_id,
                property: def.clone(),
            })?;
            output(&json!({ "animalProperty": def }), flags.format)
        }
        AnimalPropertyCommands::List => {
            let defs = effective_animal_properties(ctx.project(flags)?);
            let rows = defs.iter().map(DefinitionRow::from).collect::<Vec<_>>();
            output(&json!({ "animalProperties": rows }), flags.format)
        }
        AnimalPropertyCommands::Update {
            id,
            name,
            kind,
            required,
            default,
            clear_default,
            option,
            order,
            applies_to,
        } => {
            let mut builder = AnimalPropertyDefUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(kind) = kind {
                builder = builder.kind(parse_enum(kind, "kind")?);
            }
            if let Some(required) = required {
                builder = builder.required(*required);
            }
            if *clear_default {
                builder = builder.default_value(None);
            } else if let Some(default) = default {
                builder = builder.default_value(Some(default.clone()));
            }
            if let Some(options) = option {
                builder = builder.options(options.clone());
            }
            if let Some(order) = order {
                builder = builder.order(*order);
            }
            if let Some(applies_to) = applies_to {
                builder = builder.applies_to(parse_enum(applies_to, "applies-to")?);
            }
            let action = Action::UpdateAnimalProperty {
                project_id: project_id.clone(),
                property_id: id.clone(),
                updates: builder.build(),
            };
            // Check the edited definition before touching the live state.
            let mut preview = ctx.store.state().clone();
            fm_state::apply(&mut preview, action.clone())?;
            let def = preview
                .project(&project_id)
                .map(effective_animal_properties)
                .and_then(|defs| defs.into_iter().find(|d| &d.id == id))
                .with_context(|| format!("animal property not found: {id}"))?;
            check_definition(&def)?;
            ctx.apply(action)?;
            output(&json!({ "animalProperty": def }), flags.format)
        }
        AnimalPropertyCommands::Delete { id } => {
            let known = effective_animal_properties(ctx.project(flags)?)
                .iter()
                .any(|d| &d.id == id);
            if !known {
                bail!("animal property not found: {id}");
            }
            ctx.apply(Action::DeleteAnimalProperty {
                project_id,
                property_id: id.clone(),
            })?;
            output(
                &json!({ "deleted": id, "builtIn": is_built_in(id) }),
                flags.format,
            )
        }
        AnimalPropertyCommands::Apply => {
            ctx.apply(Action::ApplyAnimalPropertiesToAll {
                project_id: project_id.clone(),
            })?;
            let animals = ctx.project(flags)?.animals.len();
            output(&json!({ "project": project_id, "animals": animals }), flags.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use fm_core::builtins::built_in_animal_properties;
    use fm_core::entities::ProjectAnimalProperty;
    use fm_core::enums::{AppliesTo, FieldKind};

    use super::{check_definition, next_order};

    fn def(kind: FieldKind, options: &[&str], default: Option<&str>) -> ProjectAnimalProperty {
        ProjectAnimalProperty {
            id: "fld-1".into(),
            name: "Cage".into(),
            kind,
            required: false,
            default_value: default.map(str::to_string),
            options: options.iter().map(|o| (*o).to_string()).collect(),
            is_custom: true,
            order: 0,
            applies_to: AppliesTo::Both,
        }
    }

    #[test]
    fn select_needs_options() {
        assert!(check_definition(&def(FieldKind::Select, &[], None)).is_err());
        assert!(check_definition(&def(FieldKind::Select, &["A", "B"], Some("A"))).is_ok());
        assert!(check_definition(&def(FieldKind::Select, &["A", "B"], Some("C"))).is_err());
    }

    #[test]
    fn date_default_must_parse() {
        assert!(check_definition(&def(FieldKind::Date, &[], Some("2026-13-01"))).is_err());
        assert!(check_definition(&def(FieldKind::Date, &[], Some("2026-01-01"))).is_ok());
    }

    #[test]
    fn custom_order_follows_built_ins() {
        assert_eq!(next_order(&built_in_animal_properties()), 0);
        let mut defs = built_in_animal_properties();
        defs.push(def(FieldKind::Text, &[], None));
        assert_eq!(next_order(&defs), 1);
        assert_eq!(next_order(&[]), 0);
    }
}
