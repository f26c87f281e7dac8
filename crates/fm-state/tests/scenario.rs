//! End-to-end flows through the store, as the CLI drives them.

mod support;

use fm_core::enums::PropertyKind;
use fm_state::{Action, AppStore, queries};
use pretty_assertions::assert_eq;

use support::*;

#[test]
fn bound_property_deleted_from_project_and_experiment() {
    let mut store = AppStore::new(fm_core::state::AppState::default());

    store.dispatch(Action::AddProject(project("prj-lab1", "Lab1"))).unwrap();
    store
        .dispatch(Action::SetCurrentProject(Some("prj-lab1".into())))
        .unwrap();
    store
        .dispatch(Action::AddExperiment {
            project_id: "prj-lab1".into(),
            experiment: experiment("exp-trial1", "Trial1"),
        })
        .unwrap();
    store
        .dispatch(Action::AddProperty {
            project_id: "prj-lab1".into(),
            property: property("prp-protocol", "Protocol", PropertyKind::Protocol),
        })
        .unwrap();
    store
        .dispatch(Action::UpdateExperimentProperty {
            project_id: "prj-lab1".into(),
            experiment_id: "exp-trial1".into(),
            binding: file_binding("prp-protocol", "/docs/protocol.pdf"),
        })
        .unwrap();

    let trial = queries::experiment(store.state(), "prj-lab1", "exp-trial1").unwrap();
    assert_eq!(
        trial.binding("prp-protocol").unwrap().file_name.as_deref(),
        Some("protocol.pdf")
    );

    store
        .dispatch(Action::DeleteProperty {
            project_id: "prj-lab1".into(),
            property_id: "prp-protocol".into(),
        })
        .unwrap();

    let state = store.state();
    let lab = state.project("prj-lab1").unwrap();
    assert!(lab.properties.is_empty());
    assert!(lab.experiment("exp-trial1").unwrap().binding("prp-protocol").is_none());

    // The current-project view reads the same data.
    assert_eq!(state.current_project(), Some(lab));
}

#[test]
fn dispatch_to_missing_project_surfaces_not_found() {
    let mut store = AppStore::new(two_labs());
    let before = store.state().clone();
    let err = store
        .dispatch(Action::DeleteExperiment {
            project_id: "prj-nope".into(),
            experiment_id: "exp-1".into(),
        })
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "project not found: prj-nope");
    assert_eq!(store.state(), &before);
}
