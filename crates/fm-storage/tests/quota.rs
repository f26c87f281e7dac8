//! Quota handling of the key-value backend through the gateway.

use chrono::Utc;
use fm_core::entities::Project;
use fm_core::state::AppState;
use fm_storage::{DirStore, Gateway, KeyValueBackend, MemoryStore, SaveOutcome};

fn big_state() -> AppState {
    let mut state = AppState::default();
    for i in 0..20 {
        let mut project = Project::new(format!("prj-{i:08}"), format!("Project {i}"), Utc::now());
        project.description = "x".repeat(200);
        state.projects.push(project);
    }
    state
}

#[test]
fn memory_store_over_quota_fails() {
    let gateway = Gateway::new(KeyValueBackend::new(MemoryStore::new(1024), "state"));
    assert_eq!(gateway.save_if_changed(&big_state()), SaveOutcome::Failed);
    assert!(!gateway.save(&big_state()));
}

#[test]
fn dir_store_over_quota_keeps_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirStore::open(dir.path(), 1024).unwrap();
    let gateway = Gateway::new(KeyValueBackend::new(store, "state"));

    let small = AppState::default();
    assert_eq!(gateway.save_if_changed(&small), SaveOutcome::Written);
    assert_eq!(gateway.save_if_changed(&big_state()), SaveOutcome::Failed);
    assert_eq!(gateway.load(), small);
}
