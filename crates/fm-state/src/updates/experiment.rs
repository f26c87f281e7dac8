//! Experiment update builder.

use chrono::{DateTime, Utc};
use fm_core::entities::Experiment;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_animal_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ExperimentUpdate {
    pub(crate) fn merge_into(self, experiment: &mut Experiment) {
        if let Some(name) = self.name {
            experiment.name = name;
        }
        if let Some(description) = self.description {
            experiment.description = description;
        }
        if let Some(tags) = self.tags {
            experiment.tags = tags;
        }
        if let Some(start_date) = self.start_date {
            experiment.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            experiment.end_date = end_date;
        }
        if let Some(ids) = self.linked_animal_ids {
            experiment.linked_animal_ids = ids;
        }
        if let Some(updated_at) = self.updated_at {
            experiment.updated_at = updated_at;
        }
    }
}

pub struct ExperimentUpdateBuilder(ExperimentUpdate);

impl ExperimentUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ExperimentUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.0.tags = Some(tags);
        self
    }

    #[must_use]
    pub fn start_date(mut self, start_date: Option<String>) -> Self {
        self.0.start_date = Some(start_date);
        self
    }

    #[must_use]
    pub fn end_date(mut self, end_date: Option<String>) -> Self {
        self.0.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub fn linked_animal_ids(mut self, ids: Vec<String>) -> Self {
        self.0.linked_animal_ids = Some(ids);
        self
    }

    #[must_use]
    pub const fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.0.updated_at = Some(at);
        self
    }

    #[must_use]
    pub fn build(self) -> ExperimentUpdate {
        self.0
    }
}

impl Default for ExperimentUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
