//! The catalog of state mutations.
//!
//! Every change to [`AppState`] is expressed as one [`Action`] and goes
//! through [`crate::reducer::apply`]. Add actions carry fully formed entities;
//! the caller generates their IDs.

use fm_core::entities::{Animal, Experiment, ExperimentProperty, Project, ProjectAnimalProperty, Property};
use fm_core::state::{AppState, Filters};

use crate::updates::{AnimalPropertyDefUpdate, AnimalUpdate, ExperimentUpdate, ProjectUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the whole state. Used at startup and on import.
    LoadState(Box<AppState>),

    AddProject(Project),
    UpdateProject {
        project_id: String,
        updates: ProjectUpdate,
    },
    /// Also clears the current selection when it pointed at this project.
    DeleteProject {
        project_id: String,
    },
    SetCurrentProject(Option<String>),

    AddExperiment {
        project_id: String,
        experiment: Experiment,
    },
    UpdateExperiment {
        project_id: String,
        experiment_id: String,
        updates: ExperimentUpdate,
    },
    DeleteExperiment {
        project_id: String,
        experiment_id: String,
    },

    AddAnimal {
        project_id: String,
        animal: Animal,
    },
    UpdateAnimal {
        project_id: String,
        animal_id: String,
        updates: AnimalUpdate,
    },
    DeleteAnimal {
        project_id: String,
        animal_id: String,
    },

    AddProperty {
        project_id: String,
        property: Property,
    },
    /// Full replacement of the definition with the same ID.
    UpdateProperty {
        project_id: String,
        property: Property,
    },
    /// Removes the definition and every experiment binding to it.
    DeleteProperty {
        project_id: String,
        property_id: String,
    },
    /// Upsert of one file/folder binding inside one experiment.
    UpdateExperimentProperty {
        project_id: String,
        experiment_id: String,
        binding: ExperimentProperty,
    },
    /// Replaces the animal's experiment membership; not additive.
    LinkAnimalToExperiments {
        project_id: String,
        animal_id: String,
        experiment_ids: Vec<String>,
    },

    AddAnimalProperty {
        project_id: String,
        property: ProjectAnimalProperty,
    },
    UpdateAnimalProperty {
        project_id: String,
        property_id: String,
        updates: AnimalPropertyDefUpdate,
    },
    /// Removes the definition, strips matching fields from every animal, and
    /// records the ID so a built-in is not synthesized again.
    DeleteAnimalProperty {
        project_id: String,
        property_id: String,
    },
    /// Rebuilds every animal's fields from the stored definitions.
    ApplyAnimalPropertiesToAll {
        project_id: String,
    },

    SetSearchQuery(String),
    SetFilters(Filters),
    ClearSearch,
}

impl Action {
    /// Stable name used in logs, e.g. `"DELETE_PROPERTY"`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LoadState(_) => "LOAD_STATE",
            Self::AddProject(_) => "ADD_PROJECT",
            Self::UpdateProject { .. } => "UPDATE_PROJECT",
            Self::DeleteProject { .. } => "DELETE_PROJECT",
            Self::SetCurrentProject(_) => "SET_CURRENT_PROJECT",
            Self::AddExperiment { .. } => "ADD_EXPERIMENT",
            Self::UpdateExperiment { .. } => "UPDATE_EXPERIMENT",
            Self::DeleteExperiment { .. } => "DELETE_EXPERIMENT",
            Self::AddAnimal { .. } => "ADD_ANIMAL",
            Self::UpdateAnimal { .. } => "UPDATE_ANIMAL",
            Self::DeleteAnimal { .. } => "DELETE_ANIMAL",
            Self::AddProperty { .. } => "ADD_PROPERTY",
            Self::UpdateProperty { .. } => "UPDATE_PROPERTY",
            Self::DeleteProperty { .. } => "DELETE_PROPERTY",
            Self::UpdateExperimentProperty { .. } => "UPDATE_EXPERIMENT_PROPERTY",
            Self::LinkAnimalToExperiments { .. } => "LINK_ANIMAL_TO_EXPERIMENTS",
            Self::AddAnimalProperty { .. } => "ADD_ANIMAL_PROPERTY",
            Self::UpdateAnimalProperty { .. } => "UPDATE_ANIMAL_PROPERTY",
            Self::DeleteAnimalProperty { .. } => "DELETE_ANIMAL_PROPERTY",
            Self::ApplyAnimalPropertiesToAll { .. } => "APPLY_ANIMAL_PROPERTIES_TO_ALL",
            Self::SetSearchQuery(_) => "SET_SEARCH_QUERY",
            Self::SetFilters(_) => "SET_FILTERS",
            Self::ClearSearch => "CLEAR_SEARCH",
        }
    }

    /// Shorthand for [`Action::LoadState`].
    #[must_use]
    pub fn load(state: AppState) -> Self {
        Self::LoadState(Box::new(state))
    }
}
