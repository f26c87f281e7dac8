use anyhow::Context;
use chrono::Utc;
use fm_core::builtins::default_project_properties;
use fm_core::entities::Project;
use fm_core::ids::{PREFIX_PROJECT, generate_id};
use fm_state::Action;
use fm_state::queries;
use fm_state::updates::ProjectUpdateBuilder;
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ProjectSummary<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    experiments: usize,
    animals: usize,
    current: bool,
}

fn summarize<'a>(project: &'a Project, current: Option<&str>) -> ProjectSummary<'a> {
    ProjectSummary {
        id: &project.id,
        name: &project.name,
        description: &project.description,
        experiments: project.experiments.len(),
        animals: project.animals.len(),
        current: current == Some(project.id.as_str()),
    }
}

/// Handle `filemap project`.
pub fn handle(
    action: &ProjectCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Create {
            name,
            description,
            select,
            bare,
        } => {
            let mut project = Project::new(generate_id(PREFIX_PROJECT)?, name, Utc::now());
            project.description = description.clone().unwrap_or_default();
            if !bare {
                project.properties = default_project_properties()?;
            }
            let id = project.id.clone();
            ctx.apply(Action::AddProject(project))?;
            if *select {
                ctx.apply(Action::SetCurrentProject(Some(id.clone())))?;
            }
            let project = ctx
                .store
                .state()
                .project(&id)
                .context("created project missing from state")?;
            output(&json!({ "project": project }), flags.format)
        }
        ProjectCommands::List => {
            let state = ctx.store.state();
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let current = state.current_project_id.as_deref();
            let projects = state
                .projects
                .iter()
                .take(limit)
                .map(|p| summarize(p, current))
                .collect::<Vec<_>>();
            output(&json!({ "projects": projects }), flags.format)
        }
        ProjectCommands::Get { id } => {
            let project = match id {
                Some(id) => queries::project(ctx.store.state(), id)
                    .with_context(|| format!("project not found: {id}"))?,
                None => ctx.project(flags)?,
            };
            output(&json!({ "project": project }), flags.format)
        }
        ProjectCommands::Update {
            id,
            name,
            description,
        } => {
            let mut builder = ProjectUpdateBuilder::new().updated_at(Utc::now());
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(description) = description {
                builder = builder.description(description);
            }
            ctx.apply(Action::UpdateProject {
                project_id: id.clone(),
                updates: builder.build(),
            })?;
            let project = queries::project(ctx.store.state(), id)
                .with_context(|| format!("project not found: {id}"))?;
            output(&json!({ "project": project }), flags.format)
        }
        ProjectCommands::Delete { id } => {
            ctx.apply(Action::DeleteProject {
                project_id: id.clone(),
            })?;
            output(&json!({ "deleted": id }), flags.format)
        }
        ProjectCommands::Select { id, clear } => {
            let target = if *clear { None } else { id.clone() };
            ctx.apply(Action::SetCurrentProject(target.clone()))?;
            output(&json!({ "current": target }), flags.format)
        }
        ProjectCommands::Search { query, tag } => {
            let state = ctx.store.state();
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let current = state.current_project_id.as_deref();
            let projects = queries::search_projects(state, query, tag)
                .into_iter()
                .take(limit)
                .map(|p| summarize(p, current))
                .collect::<Vec<_>>();
            output(&json!({ "projects": projects }), flags.format)
        }
    }
}
