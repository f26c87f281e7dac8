use anyhow::{Context, bail};
use chrono::Utc;
use fm_core::builtins::{effective_animal_properties, is_built_in};
use fm_core::entities::{Animal, AnimalProperty, Project, ProjectAnimalProperty};
use fm_core::enums::AnimalKind;
use fm_core::ids::{PREFIX_ANIMAL, PREFIX_ANIMAL_FIELD, generate_id};
use fm_state::Action;
use fm_state::queries;
use fm_state::updates::AnimalUpdateBuilder;
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AnimalCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AnimalSummary<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    kind: AnimalKind,
    species: Option<&'a str>,
    fields: usize,
    experiments: &'a [String],
}

fn summarize(animal: &Animal) -> AnimalSummary<'_> {
    AnimalSummary {
        id: &animal.id,
        name: &animal.name,
        kind: animal.kind,
        species: animal.species.as_deref(),
        fields: animal.properties.len(),
        experiments: &animal.experiment_ids,
    }
}

fn check_experiments(project: &Project, ids: &[String]) -> anyhow::Result<()> {
    if let Some(missing) = ids.iter().find(|id| project.experiment(id).is_none()) {
        bail!("experiment not found: {missing}");
    }
    Ok(())
}

/// Resolve a field definition by ID, then by case-insensitive name.
fn find_definition(project: &Project, field: &str) -> Option<ProjectAnimalProperty> {
    let defs = effective_animal_properties(project);
    defs.iter()
        .find(|d| d.id == field)
        .or_else(|| defs.iter().find(|d| d.name.eq_ignore_ascii_case(field)))
        .cloned()
}

/// Card keys that are not field definitions.
const CARD_KEYS: [&str; 2] = ["name", "species"];

/// Resolve the requested card fields for an animal of `kind`. Built-in
/// fields are stored by ID and custom fields by name.
fn display_keys(
    project: &Project,
    kind: AnimalKind,
    fields: &[String],
) -> anyhow::Result<Vec<String>> {
    let mut keys: Vec<String> = Vec::with_capacity(fields.len());
    for field in fields {
        let key = if let Some(card) = CARD_KEYS.iter().find(|k| k.eq_ignore_ascii_case(field)) {
            (*card).to_string()
        } else {
            let def = find_definition(project, field)
                .with_context(|| format!("animal field not defined: {field}"))?;
            if !def.applies_to_kind(kind) {
                bail!("field '{}' does not apply to {kind}s", def.name);
            }
            if is_built_in(&def.id) {
                def.id
            } else {
                def.name
            }
        };
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    Ok(keys)
}

/// The animal itself, or with `all_of_kind` every animal sharing its kind.
fn display_targets(
    project: &Project,
    id: &str,
    all_of_kind: bool,
) -> anyhow::Result<(AnimalKind, Vec<String>)> {
    let animal = project
        .animal(id)
        .with_context(|| format!("animal not found: {id}"))?;
    let targets = if all_of_kind {
        project
            .animals
            .iter()
            .filter(|a| a.kind == animal.kind)
            .map(|a| a.id.clone())
            .collect()
    } else {
        vec![animal.id.clone()]
    };
    Ok((animal.kind, targets))
}

/// The animal's field list with `def` set to `value`. An existing value for
/// the definition (matched by ID or name) is replaced in place.
fn with_field_value(
    animal: &Animal,
    def: &ProjectAnimalProperty,
    value: String,
) -> anyhow::Result<Vec<AnimalProperty>> {
    let mut properties = animal.properties.clone();
    let existing = properties
        .iter_mut()
        .find(|p| p.id == def.id || p.name == def.name);
    match existing {
        Some(slot) => {
            slot.value = value;
            slot.kind = def.kind;
        }
        None => properties.push(AnimalProperty {
            id: generate_id(PREFIX_ANIMAL_FIELD)?,
            name: def.name.clone(),
            value,
            kind: def.kind,
            required: def.required,
        }),
    }
    Ok(properties)
}

/// Handle `filemap animal`.
pub fn handle(
    action: &AnimalCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project_id = ctx.project_id(flags)?;

    match action {
        AnimalCommands::Add {
            name,
            kind,
            species,
            experiment,
        } => {
            check_experiments(ctx.project(flags)?, experiment)?;
            let animal = Animal {
                id: generate_id(PREFIX_ANIMAL)?,
                kind: parse_enum(kind, "kind")?,
                name: name.clone(),
                species: species.clone(),
                properties: Vec::new(),
                experiment_ids: experiment.clone(),
                display_properties: Some(vec!["name".to_string(), "species".to_string()]),
                created_at: Utc::now(),
            };
            ctx.apply(Action::AddAnimal {
                project_id,
                animal: animal.clone(),
            })?;
            output(&json!({ "animal": animal }), flags.format)
        }
        AnimalCommands::List { experiment } => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let state = ctx.store.state();
            let animals: Vec<&Animal> = match experiment {
                Some(experiment_id) => {
                    queries::experiment(state, &project_id, experiment_id)
                        .with_context(|| format!("experiment not found: {experiment_id}"))?;
                    queries::animals_for_experiment(state, &project_id, experiment_id)
                }
                None => ctx.project(flags)?.animals.iter().collect(),
            };
            let animals = animals
                .into_iter()
                .take(limit)
                .map(summarize)
                .collect::<Vec<_>>();
            output(&json!({ "animals": animals }), flags.format)
        }
        AnimalCommands::Update {
            id,
            name,
            kind,
            species,
            clear_species,
        } => {
            let mut builder = AnimalUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(kind) = kind {
                builder = builder.kind(parse_enum(kind, "kind")?);
            }
            if *clear_species {
                builder = builder.species(None);
            } else if let Some(species) = species {
                builder = builder.species(Some(species.clone()));
            }
            ctx.apply(Action::UpdateAnimal {
                project_id: project_id.clone(),
                animal_id: id.clone(),
                updates: builder.build(),
            })?;
            let animal = queries::animal(ctx.store.state(), &project_id, id)
                .with_context(|| format!("animal not found: {id}"))?;
            output(&json!({ "animal": animal }), flags.format)
        }
        AnimalCommands::Delete { id } => {
            ctx.apply(Action::DeleteAnimal {
                project_id,
                animal_id: id.clone(),
            })?;
            output(&json!({ "deleted": id }), flags.format)
        }
        AnimalCommands::Link { id, experiment } => {
            check_experiments(ctx.project(flags)?, experiment)?;
            ctx.apply(Action::LinkAnimalToExperiments {
                project_id,
                animal_id: id.clone(),
                experiment_ids: experiment.clone(),
            })?;
            output(&json!({ "animal": id, "experiments": experiment }), flags.format)
        }
        AnimalCommands::Set { id, field, value } => {
            let project = ctx.project(flags)?;
            let animal = project
                .animal(id)
                .with_context(|| format!("animal not found: {id}"))?;
            let def = find_definition(project, field)
                .with_context(|| format!("animal field not defined: {field}"))?;
            if !def.applies_to_kind(animal.kind) {
                bail!("field '{}' does not apply to {}s", def.name, animal.kind);
            }
            let stored = def
                .validate_value(value)?
                .map(fm_core::field_value::FieldValue::into_stored)
                .unwrap_or_default();
            let properties = with_field_value(animal, &def, stored)?;
            ctx.apply(Action::UpdateAnimal {
                project_id: project_id.clone(),
                animal_id: id.clone(),
                updates: AnimalUpdateBuilder::new().properties(properties).build(),
            })?;
            let animal = queries::animal(ctx.store.state(), &project_id, id)
                .with_context(|| format!("animal not found: {id}"))?;
            output(&json!({ "animal": animal }), flags.format)
        }
        AnimalCommands::Display {
            id,
            fields,
            all_of_kind,
        } => {
            let project = ctx.project(flags)?;
            let (kind, targets) = display_targets(project, id, *all_of_kind)?;
            let keys = display_keys(project, kind, fields)?;
            for animal_id in &targets {
                ctx.apply(Action::UpdateAnimal {
                    project_id: project_id.clone(),
                    animal_id: animal_id.clone(),
                    updates: AnimalUpdateBuilder::new()
                        .display_properties(Some(keys.clone()))
                        .build(),
                })?;
            }
            output(
                &json!({ "animals": targets, "displayProperties": keys }),
                flags.format,
            )
        }
    }
}
