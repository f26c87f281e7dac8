//! The state transition function.
//!
//! [`apply`] mutates in place and reports an action that addresses a missing
//! project or entity as [`StateError::NotFound`], leaving the state exactly as
//! it was. [`reduce`] is the total `(state, action) -> state` form: a missing
//! target is logged and the input state is returned unchanged.
//!
//! Only the addressed project is touched; sibling projects are never
//! rewritten.

use fm_core::builtins::built_in_animal_properties;
use fm_core::entities::{Animal, AnimalProperty, Experiment, Project, ProjectAnimalProperty};
use fm_core::ids::PREFIX_ANIMAL_FIELD;
use fm_core::state::{AppState, Filters};
use tracing::debug;

use crate::action::Action;
use crate::error::StateError;

/// Apply one action to `state`.
///
/// # Errors
///
/// Returns `StateError::NotFound` when the action addresses a project,
/// experiment, animal, property, or field definition that does not exist. The
/// state is not modified in that case.
pub fn apply(state: &mut AppState, action: Action) -> Result<(), StateError> {
    match action {
        Action::LoadState(next) => {
            *state = *next;
            state.drop_dangling_selection();
        }

        Action::AddProject(project) => state.projects.push(project),
        Action::UpdateProject {
            project_id,
            updates,
        } => updates.merge_into(project_entry(state, &project_id)?),
        Action::DeleteProject { project_id } => {
            if state.project(&project_id).is_none() {
                return Err(StateError::not_found("project", &project_id));
            }
            state.projects.retain(|p| p.id != project_id);
            if state.current_project_id.as_deref() == Some(project_id.as_str()) {
                state.current_project_id = None;
            }
        }
        Action::SetCurrentProject(None) => state.current_project_id = None,
        Action::SetCurrentProject(Some(project_id)) => {
            if state.project(&project_id).is_none() {
                return Err(StateError::not_found("project", &project_id));
            }
            state.current_project_id = Some(project_id);
        }

        Action::AddExperiment {
            project_id,
            experiment,
        } => project_entry(state, &project_id)?.experiments.push(experiment),
        Action::UpdateExperiment {
            project_id,
            experiment_id,
            updates,
        } => {
            let project = project_entry(state, &project_id)?;
            updates.merge_into(experiment_entry(project, &experiment_id)?);
        }
        Action::DeleteExperiment {
            project_id,
            experiment_id,
        } => {
            let project = project_entry(state, &project_id)?;
            experiment_entry(project, &experiment_id)?;
            project.experiments.retain(|e| e.id != experiment_id);
        }

        Action::AddAnimal { project_id, animal } => {
            project_entry(state, &project_id)?.animals.push(animal);
        }
        Action::UpdateAnimal {
            project_id,
            animal_id,
            updates,
        } => {
            let project = project_entry(state, &project_id)?;
            updates.merge_into(animal_entry(project, &animal_id)?);
        }
        Action::DeleteAnimal {
            project_id,
            animal_id,
        } => {
            let project = project_entry(state, &project_id)?;
            animal_entry(project, &animal_id)?;
            project.animals.retain(|a| a.id != animal_id);
        }

        Action::AddProperty {
            project_id,
            property,
        } => project_entry(state, &project_id)?.properties.push(property),
        Action::UpdateProperty {
            project_id,
            property,
        } => {
            let project = project_entry(state, &project_id)?;
            let slot = project
                .properties
                .iter_mut()
                .find(|p| p.id == property.id)
                .ok_or_else(|| StateError::not_found("property", &property.id))?;
            *slot = property;
        }
        Action::DeleteProperty {
            project_id,
            property_id,
        } => {
            let project = project_entry(state, &project_id)?;
            project.properties.retain(|p| p.id != property_id);
            for experiment in &mut project.experiments {
                experiment
                    .properties
                    .retain(|binding| binding.property_id != property_id);
            }
        }
        Action::UpdateExperimentProperty {
            project_id,
            experiment_id,
            binding,
        } => {
            let project = project_entry(state, &project_id)?;
            let experiment = experiment_entry(project, &experiment_id)?;
            let slot = experiment
                .properties
                .iter()
                .position(|b| b.property_id == binding.property_id);
            match slot {
                Some(index) => {
                    let existing = &mut experiment.properties[index];
                    existing.file_path = binding.file_path;
                    existing.file_name = binding.file_name;
                    existing.folder_path = binding.folder_path;
                }
                None => experiment.properties.push(binding),
            }
        }
        Action::LinkAnimalToExperiments {
            project_id,
            animal_id,
            experiment_ids,
        } => {
            let project = project_entry(state, &project_id)?;
            animal_entry(project, &animal_id)?.experiment_ids = experiment_ids;
        }

        Action::AddAnimalProperty {
            project_id,
            property,
        } => project_entry(state, &project_id)?
            .animal_properties
            .push(property),
        Action::UpdateAnimalProperty {
            project_id,
            property_id,
            updates,
        } => {
            let project = project_entry(state, &project_id)?;
            let stored = project
                .animal_properties
                .iter()
                .position(|d| d.id == property_id);
            if let Some(index) = stored {
                updates.merge_into(&mut project.animal_properties[index]);
            } else {
                // Editing a synthesized built-in stores it as an override row.
                let mut def = materialize_built_in(project, &property_id)
                    .ok_or_else(|| StateError::not_found("animal property", &property_id))?;
                updates.merge_into(&mut def);
                project.animal_properties.push(def);
            }
        }
        Action::DeleteAnimalProperty {
            project_id,
            property_id,
        } => {
            let project = project_entry(state, &project_id)?;
            project.animal_properties.retain(|d| d.id != property_id);
            if !project.deleted_built_in_properties.contains(&property_id) {
                project.deleted_built_in_properties.push(property_id.clone());
            }
            for animal in &mut project.animals {
                animal
                    .properties
                    .retain(|p| p.name != property_id && p.id != property_id);
            }
        }
        Action::ApplyAnimalPropertiesToAll { project_id } => {
            let project = project_entry(state, &project_id)?;
            let defs = &project.animal_properties;
            for animal in &mut project.animals {
                animal.properties = resync_properties(animal, defs);
            }
        }

        Action::SetSearchQuery(query) => state.search_query = query,
        Action::SetFilters(filters) => state.filters = filters,
        Action::ClearSearch => {
            state.search_query.clear();
            state.filters = Filters::default();
        }
    }
    Ok(())
}

/// Pure, total transition: an action addressing a missing entity returns the
/// input state unchanged.
#[must_use]
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    let name = action.name();
    if let Err(error) = apply(&mut state, action) {
        debug!(action = name, %error, "action ignored");
    }
    state
}

fn project_entry<'a>(state: &'a mut AppState, id: &str) -> Result<&'a mut Project, StateError> {
    state
        .project_mut(id)
        .ok_or_else(|| StateError::not_found("project", id))
}

fn experiment_entry<'a>(
    project: &'a mut Project,
    id: &str,
) -> Result<&'a mut Experiment, StateError> {
    project
        .experiments
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| StateError::not_found("experiment", id))
}

fn animal_entry<'a>(project: &'a mut Project, id: &str) -> Result<&'a mut Animal, StateError> {
    project
        .animals
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| StateError::not_found("animal", id))
}

fn materialize_built_in(project: &Project, id: &str) -> Option<ProjectAnimalProperty> {
    if project.deleted_built_in_properties.iter().any(|d| d == id) {
        return None;
    }
    built_in_animal_properties().into_iter().find(|b| b.id == id)
}

/// Field ID for a value created by a resync, stable across runs.
fn resync_field_id(animal_id: &str, def_id: &str) -> String {
    format!("{PREFIX_ANIMAL_FIELD}-{animal_id}-{def_id}")
}

/// One field per definition, in definition order. An existing non-empty value
/// with the same name survives; otherwise the default, otherwise empty.
fn resync_properties(animal: &Animal, defs: &[ProjectAnimalProperty]) -> Vec<AnimalProperty> {
    defs.iter()
        .map(|def| {
            let existing = animal.property(&def.name);
            let value = existing
                .map(|p| p.value.as_str())
                .filter(|v| !v.is_empty())
                .or(def.default_value.as_deref())
                .unwrap_or_default()
                .to_string();
            AnimalProperty {
                id: existing.map_or_else(|| resync_field_id(&animal.id, &def.id), |p| p.id.clone()),
                name: def.name.clone(),
                value,
                kind: def.kind,
                required: def.required,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fm_core::entities::{ExperimentProperty, Property};
    use fm_core::enums::{AnimalKind, AppliesTo, FieldKind, PropertyKind};
    use pretty_assertions::assert_eq;

    use crate::updates::{AnimalPropertyDefUpdateBuilder, ProjectUpdateBuilder};

    fn experiment(id: &str) -> Experiment {
        let now = Utc::now();
        Experiment {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            properties: Vec::new(),
            tags: Vec::new(),
            start_date: None,
            end_date: None,
            linked_animal_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn animal(id: &str) -> Animal {
        Animal {
            id: id.into(),
            kind: AnimalKind::Animal,
            name: id.into(),
            species: None,
            properties: Vec::new(),
            experiment_ids: Vec::new(),
            display_properties: None,
            created_at: Utc::now(),
        }
    }

    fn seeded() -> AppState {
        let now = Utc::now();
        let mut lab = Project::new("prj-a", "Lab A", now);
        lab.experiments.push(experiment("exp-1"));
        lab.animals.push(animal("ani-1"));
        AppState {
            projects: vec![lab, Project::new("prj-b", "Lab B", now)],
            ..AppState::default()
        }
    }

    #[test]
    fn update_project_merges_only_given_fields() {
        let mut state = seeded();
        apply(
            &mut state,
            Action::UpdateProject {
                project_id: "prj-a".into(),
                updates: ProjectUpdateBuilder::new().description("mice").build(),
            },
        )
        .unwrap();
        let project = state.project("prj-a").unwrap();
        assert_eq!(project.name, "Lab A");
        assert_eq!(project.description, "mice");
    }

    #[test]
    fn missing_project_is_not_found_and_state_unchanged() {
        let mut state = seeded();
        let before = state.clone();
        let err = apply(
            &mut state,
            Action::AddExperiment {
                project_id: "prj-zzz".into(),
                experiment: experiment("exp-9"),
            },
        )
        .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(state, before);
    }

    #[test]
    fn reduce_swallows_missing_entity() {
        let state = seeded();
        let next = reduce(
            state.clone(),
            Action::DeleteExperiment {
                project_id: "prj-a".into(),
                experiment_id: "exp-missing".into(),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn delete_current_project_clears_selection() {
        let mut state = seeded();
        apply(&mut state, Action::SetCurrentProject(Some("prj-a".into()))).unwrap();
        apply(
            &mut state,
            Action::DeleteProject {
                project_id: "prj-a".into(),
            },
        )
        .unwrap();
        assert!(state.current_project_id.is_none());
        assert_eq!(state.projects.len(), 1);
    }

    #[test]
    fn selecting_unknown_project_fails() {
        let mut state = seeded();
        assert!(apply(&mut state, Action::SetCurrentProject(Some("prj-x".into()))).is_err());
        assert!(state.current_project_id.is_none());
    }

    #[test]
    fn current_project_view_follows_mutations() {
        let mut state = seeded();
        apply(&mut state, Action::SetCurrentProject(Some("prj-a".into()))).unwrap();
        apply(
            &mut state,
            Action::AddExperiment {
                project_id: "prj-a".into(),
                experiment: experiment("exp-2"),
            },
        )
        .unwrap();
        assert_eq!(state.current_project().unwrap().experiments.len(), 2);
    }

    #[test]
    fn experiment_binding_upserts() {
        let mut state = seeded();
        let bind = |path: &str| Action::UpdateExperimentProperty {
            project_id: "prj-a".into(),
            experiment_id: "exp-1".into(),
            binding: ExperimentProperty {
                property_id: "prp-1".into(),
                file_path: Some(path.into()),
                file_name: Some("f".into()),
                folder_path: None,
            },
        };
        apply(&mut state, bind("/a")).unwrap();
        apply(&mut state, bind("/b")).unwrap();
        let exp = state.project("prj-a").unwrap().experiment("exp-1").unwrap();
        assert_eq!(exp.properties.len(), 1);
        assert_eq!(exp.properties[0].file_path.as_deref(), Some("/b"));
    }

    #[test]
    fn update_property_replaces_by_id() {
        let mut state = seeded();
        let mut property = Property {
            id: "prp-1".into(),
            name: "Protocol".into(),
            kind: PropertyKind::Protocol,
            custom_type: None,
        };
        apply(
            &mut state,
            Action::AddProperty {
                project_id: "prj-a".into(),
                property: property.clone(),
            },
        )
        .unwrap();
        property.name = "SOP".into();
        apply(
            &mut state,
            Action::UpdateProperty {
                project_id: "prj-a".into(),
                property: property.clone(),
            },
        )
        .unwrap();
        assert_eq!(state.project("prj-a").unwrap().properties, vec![property]);
    }

    #[test]
    fn updating_built_in_stores_override() {
        let mut state = seeded();
        apply(
            &mut state,
            Action::UpdateAnimalProperty {
                project_id: "prj-a".into(),
                property_id: "sex".into(),
                updates: AnimalPropertyDefUpdateBuilder::new()
                    .kind(FieldKind::Select)
                    .options(vec!["male".into(), "female".into()])
                    .build(),
            },
        )
        .unwrap();
        let stored = &state.project("prj-a").unwrap().animal_properties;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "sex");
        assert_eq!(stored[0].kind, FieldKind::Select);
        assert_eq!(stored[0].order, -3);
        assert_eq!(stored[0].applies_to, AppliesTo::Animal);
    }

    #[test]
    fn updating_unknown_field_definition_fails() {
        let mut state = seeded();
        let result = apply(
            &mut state,
            Action::UpdateAnimalProperty {
                project_id: "prj-a".into(),
                property_id: "fld-missing".into(),
                updates: AnimalPropertyDefUpdateBuilder::new().required(true).build(),
            },
        );
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn clear_search_resets_query_and_filters() {
        let mut state = seeded();
        apply(&mut state, Action::SetSearchQuery("mouse".into())).unwrap();
        apply(
            &mut state,
            Action::SetFilters(Filters {
                query: "x".into(),
                tags: vec!["pilot".into()],
            }),
        )
        .unwrap();
        apply(&mut state, Action::ClearSearch).unwrap();
        assert!(state.search_query.is_empty());
        assert!(state.filters.is_empty());
    }

    #[test]
    fn resync_ids_are_stable() {
        let a = animal("ani-1");
        let defs = vec![ProjectAnimalProperty {
            id: "fld-cage".into(),
            name: "Cage".into(),
            kind: FieldKind::Text,
            required: false,
            default_value: None,
            options: Vec::new(),
            is_custom: true,
            order: 0,
            applies_to: AppliesTo::Both,
        }];
        let first = resync_properties(&a, &defs);
        assert_eq!(first[0].id, "apr-ani-1-fld-cage");
        assert_eq!(first[0].value, "");
        assert_eq!(resync_properties(&a, &defs), first);
    }
}
