use anyhow::Context;
use chrono::Utc;
use fm_core::entities::Experiment;
use fm_core::ids::{PREFIX_EXPERIMENT, generate_id};
use fm_state::Action;
use fm_state::queries;
use fm_state::updates::ExperimentUpdateBuilder;
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExperimentCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExperimentSummary<'a> {
    id: &'a str,
    name: &'a str,
    tags: &'a [String],
    start: Option<&'a str>,
    end: Option<&'a str>,
    bound: usize,
    animals: usize,
}

fn summarize(experiment: &Experiment) -> ExperimentSummary<'_> {
    ExperimentSummary {
        id: &experiment.id,
        name: &experiment.name,
        tags: &experiment.tags,
        start: experiment.start_date.as_deref(),
        end: experiment.end_date.as_deref(),
        bound: experiment.properties.iter().filter(|b| b.is_bound()).count(),
        animals: experiment.linked_animal_ids.len(),
    }
}

fn optional_date(raw: Option<&String>, field: &str) -> anyhow::Result<Option<String>> {
    raw.map(|value| parse_date(value, field)).transpose()
}

/// Handle `filemap experiment`.
pub fn handle(
    action: &ExperimentCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project_id = ctx.project_id(flags)?;
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);

    match action {
        ExperimentCommands::Create {
            name,
            description,
            tag,
            start,
            end,
        } => {
            let now = Utc::now();
            let experiment = Experiment {
                id: generate_id(PREFIX_EXPERIMENT)?,
                name: name.clone(),
                description: description.clone().unwrap_or_default(),
                properties: Vec::new(),
                tags: tag.clone(),
                start_date: optional_date(start.as_ref(), "start")?,
                end_date: optional_date(end.as_ref(), "end")?,
                linked_animal_ids: Vec::new(),
                created_at: now,
                updated_at: now,
            };
            let id = experiment.id.clone();
            ctx.apply(Action::AddExperiment {
                project_id: project_id.clone(),
                experiment,
            })?;
            let experiment = queries::experiment(ctx.store.state(), &project_id, &id)
                .context("created experiment missing from state")?;
            output(&json!({ "experiment": experiment }), flags.format)
        }
        ExperimentCommands::List => {
            let project = ctx.project(flags)?;
            let experiments = project
                .experiments
                .iter()
                .take(limit)
                .map(summarize)
                .collect::<Vec<_>>();
            output(&json!({ "experiments": experiments }), flags.format)
        }
        ExperimentCommands::Update {
            id,
            name,
            description,
            tag,
            start,
            end,
            clear_start,
            clear_end,
        } => {
            let mut builder = ExperimentUpdateBuilder::new().updated_at(Utc::now());
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(description) = description {
                builder = builder.description(description);
            }
            if let Some(tags) = tag {
                builder = builder.tags(tags.clone());
            }
            if *clear_start {
                builder = builder.start_date(None);
            } else if let Some(start) = optional_date(start.as_ref(), "start")? {
                builder = builder.start_date(Some(start));
            }
            if *clear_end {
                builder = builder.end_date(None);
            } else if let Some(end) = optional_date(end.as_ref(), "end")? {
                builder = builder.end_date(Some(end));
            }
            ctx.apply(Action::UpdateExperiment {
                project_id: project_id.clone(),
                experiment_id: id.clone(),
                updates: builder.build(),
            })?;
            let experiment = queries::experiment(ctx.store.state(), &project_id, id)
                .with_context(|| format!("experiment not found: {id}"))?;
            output(&json!({ "experiment": experiment }), flags.format)
        }
        ExperimentCommands::Delete { id } => {
            ctx.apply(Action::DeleteExperiment {
                project_id,
                experiment_id: id.clone(),
            })?;
            output(&json!({ "deleted": id }), flags.format)
        }
        ExperimentCommands::Search { query, tag } => {
            ctx.project(flags)?;
            let experiments = queries::search_experiments(ctx.store.state(), &project_id, query, tag)
                .into_iter()
                .take(limit)
                .map(summarize)
                .collect::<Vec<_>>();
            output(&json!({ "experiments": experiments }), flags.format)
        }
    }
}
