//! Read-side lookups and searches over [`AppState`].

use fm_core::entities::{Animal, Experiment, Project, Property};
use fm_core::state::AppState;

#[must_use]
pub fn project<'a>(state: &'a AppState, project_id: &str) -> Option<&'a Project> {
    state.project(project_id)
}

#[must_use]
pub fn experiment<'a>(
    state: &'a AppState,
    project_id: &str,
    experiment_id: &str,
) -> Option<&'a Experiment> {
    state.project(project_id)?.experiment(experiment_id)
}

#[must_use]
pub fn animal<'a>(state: &'a AppState, project_id: &str, animal_id: &str) -> Option<&'a Animal> {
    state.project(project_id)?.animal(animal_id)
}

#[must_use]
pub fn property<'a>(
    state: &'a AppState,
    project_id: &str,
    property_id: &str,
) -> Option<&'a Property> {
    state.project(project_id)?.property(property_id)
}

fn matches_text(query: &str, fields: &[&str]) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

/// Projects whose name or description contains `query` (case-insensitive)
/// and, when `tags` is non-empty, where some experiment carries any of them.
#[must_use]
pub fn search_projects<'a>(state: &'a AppState, query: &str, tags: &[String]) -> Vec<&'a Project> {
    state
        .projects
        .iter()
        .filter(|p| matches_text(query, &[&p.name, &p.description]))
        .filter(|p| {
            tags.is_empty()
                || tags
                    .iter()
                    .any(|tag| p.experiments.iter().any(|e| e.has_tag(tag)))
        })
        .collect()
}

/// Experiments of one project matching `query` on name or description and
/// carrying any of `tags`. Unknown projects yield nothing.
#[must_use]
pub fn search_experiments<'a>(
    state: &'a AppState,
    project_id: &str,
    query: &str,
    tags: &[String],
) -> Vec<&'a Experiment> {
    let Some(project) = state.project(project_id) else {
        return Vec::new();
    };
    project
        .experiments
        .iter()
        .filter(|e| matches_text(query, &[&e.name, &e.description]))
        .filter(|e| tags.is_empty() || tags.iter().any(|tag| e.has_tag(tag)))
        .collect()
}

/// Animals linked to an experiment from either side of the relation.
#[must_use]
pub fn animals_for_experiment<'a>(
    state: &'a AppState,
    project_id: &str,
    experiment_id: &str,
) -> Vec<&'a Animal> {
    let Some(project) = state.project(project_id) else {
        return Vec::new();
    };
    let linked: &[String] = project
        .experiment(experiment_id)
        .map_or(&[], |e| e.linked_animal_ids.as_slice());
    project
        .animals
        .iter()
        .filter(|a| a.experiment_ids.iter().any(|id| id == experiment_id) || linked.contains(&a.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fm_core::enums::AnimalKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn experiment(id: &str, name: &str, tags: &[&str]) -> Experiment {
        let now = Utc::now();
        Experiment {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            properties: Vec::new(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            start_date: None,
            end_date: None,
            linked_animal_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn state() -> AppState {
        let now = Utc::now();
        let mut neuro = Project::new("prj-1", "Neuro Lab", now);
        neuro.description = "Hippocampus imaging".into();
        neuro.experiments = vec![
            experiment("exp-1", "Pilot Trial", &["pilot"]),
            experiment("exp-2", "Main Run", &["main", "imaging"]),
        ];
        neuro.animals = vec![Animal {
            id: "ani-1".into(),
            kind: AnimalKind::Animal,
            name: "M1".into(),
            species: None,
            properties: Vec::new(),
            experiment_ids: vec!["exp-1".into()],
            display_properties: None,
            created_at: now,
        }];
        neuro.experiments[1].linked_animal_ids = vec!["ani-1".into()];
        let cardio = Project::new("prj-2", "Cardio", now);
        AppState {
            projects: vec![neuro, cardio],
            ..AppState::default()
        }
    }

    #[rstest]
    #[case("", &[], &["prj-1", "prj-2"])]
    #[case("neuro", &[], &["prj-1"])]
    #[case("HIPPO", &[], &["prj-1"])]
    #[case("", &["imaging"], &["prj-1"])]
    #[case("cardio", &["imaging"], &[])]
    fn project_search(#[case] query: &str, #[case] tags: &[&str], #[case] expected: &[&str]) {
        let state = state();
        let tags: Vec<String> = tags.iter().map(|t| (*t).to_string()).collect();
        let found = search_projects(&state, query, &tags);
        let ids: Vec<&str> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn experiment_search_filters_by_tag_and_text() {
        let state = state();
        let found = search_experiments(&state, "prj-1", "run", &[]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "exp-2");
        let found = search_experiments(&state, "prj-1", "", &["pilot".into()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "exp-1");
        assert!(search_experiments(&state, "prj-x", "", &[]).is_empty());
    }

    #[test]
    fn animals_found_from_either_side() {
        let state = state();
        assert_eq!(animals_for_experiment(&state, "prj-1", "exp-1").len(), 1);
        assert_eq!(animals_for_experiment(&state, "prj-1", "exp-2").len(), 1);
        assert!(animals_for_experiment(&state, "prj-2", "exp-1").is_empty());
    }

    #[test]
    fn nested_lookups() {
        let state = state();
        assert!(super::experiment(&state, "prj-1", "exp-2").is_some());
        assert!(animal(&state, "prj-1", "ani-1").is_some());
        assert!(animal(&state, "prj-2", "ani-1").is_none());
        assert!(property(&state, "prj-1", "prp-1").is_none());
        assert!(project(&state, "prj-2").is_some());
    }
}
