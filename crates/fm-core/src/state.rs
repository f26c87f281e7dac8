//! Top-level application state and its on-disk document shape.
//!
//! In memory the current project is held as an ID and resolved against the
//! canonical project list on read. On disk the document carries a full
//! `currentProject` copy, the format earlier releases wrote. Loading keeps only
//! the copy's `id`, and drops it when no project in the list has that ID.

use std::borrow::Cow;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entities::Project;

/// Free-text query plus tag filter used by the search views.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Filters {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Filters {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.tags.is_empty()
    }
}

/// The whole application state: the unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub projects: Vec<Project>,
    /// Always `None` or the ID of a project in `projects`.
    pub current_project_id: Option<String>,
    pub search_query: String,
    pub filters: Filters,
}

impl AppState {
    /// Resolve the current project against the canonical list.
    #[must_use]
    pub fn current_project(&self) -> Option<&Project> {
        let id = self.current_project_id.as_deref()?;
        self.project(id)
    }

    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn project_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.current_project_id.is_none()
    }

    /// Clear the current selection if it no longer names a project.
    pub fn drop_dangling_selection(&mut self) {
        let dangling = self
            .current_project_id
            .as_deref()
            .is_some_and(|id| self.project(id).is_none());
        if dangling {
            self.current_project_id = None;
        }
    }
}

/// Serialized shape of [`AppState`], as written to the state file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppStateDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub current_project: Option<Project>,
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub filters: Filters,
}

impl From<AppStateDocument> for AppState {
    fn from(doc: AppStateDocument) -> Self {
        let current = doc.current_project.map(|p| p.id);
        Self::assemble(doc.projects, current, doc.search_query, doc.filters)
    }
}

impl From<&AppState> for AppStateDocument {
    fn from(state: &AppState) -> Self {
        Self {
            projects: state.projects.clone(),
            current_project: state.current_project().cloned(),
            search_query: state.search_query.clone(),
            filters: state.filters.clone(),
        }
    }
}

impl AppState {
    fn assemble(
        projects: Vec<Project>,
        current_project_id: Option<String>,
        search_query: String,
        filters: Filters,
    ) -> Self {
        let current_project_id =
            current_project_id.filter(|id| projects.iter().any(|p| &p.id == id));
        Self {
            projects,
            current_project_id,
            search_query,
            filters,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AppStateView<'a> {
    projects: &'a [Project],
    current_project: Option<&'a Project>,
    search_query: &'a str,
    filters: &'a Filters,
}

impl Serialize for AppState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        AppStateView {
            projects: &self.projects,
            current_project: self.current_project(),
            search_query: &self.search_query,
            filters: &self.filters,
        }
        .serialize(serializer)
    }
}

/// Only the `id` of the stored `currentProject` copy is read, so a stale or
/// partial copy never blocks loading.
#[derive(Deserialize)]
struct ProjectRef {
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppStateInput {
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    current_project: Option<ProjectRef>,
    #[serde(default)]
    search_query: String,
    #[serde(default)]
    filters: Filters,
}

impl<'de> Deserialize<'de> for AppState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let input = AppStateInput::deserialize(deserializer)?;
        Ok(Self::assemble(
            input.projects,
            input.current_project.map(|p| p.id),
            input.search_query,
            input.filters,
        ))
    }
}

impl JsonSchema for AppState {
    fn schema_name() -> Cow<'static, str> {
        AppStateDocument::schema_name()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        AppStateDocument::json_schema(generator)
    }
}
