//! Gateway behavior over real backends.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{TimeZone, Utc};
use fm_core::entities::{Animal, AnimalProperty, Experiment, ExperimentProperty, Project};
use fm_core::enums::{AnimalKind, FieldKind};
use fm_core::state::{AppState, Filters};
use fm_storage::{
    FileBackend, Gateway, KeyValueBackend, MemoryStore, SaveOutcome, StorageBackend, StorageError,
};
use pretty_assertions::assert_eq;

/// In-memory backend that counts writes.
#[derive(Default)]
struct CountingBackend {
    stored: Mutex<Option<String>>,
    writes: AtomicUsize,
}

impl StorageBackend for CountingBackend {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.stored.lock().unwrap().clone())
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.stored.lock().unwrap() = Some(contents.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "counting".into()
    }
}

fn rich_state() -> AppState {
    let at = Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap();
    let mut project = Project::new("prj-1", "Lab1", at);
    project.experiments.push(Experiment {
        id: "exp-1".into(),
        name: "Trial1".into(),
        description: "first".into(),
        properties: vec![ExperimentProperty {
            property_id: "prp-1".into(),
            file_path: None,
            file_name: None,
            folder_path: Some("/data/run1".into()),
        }],
        tags: vec!["pilot".into()],
        start_date: Some("2026-02-01".into()),
        end_date: Some("2026-02-10".into()),
        linked_animal_ids: vec!["ani-1".into()],
        created_at: at,
        updated_at: at,
    });
    project.animals.push(Animal {
        id: "ani-1".into(),
        kind: AnimalKind::Sample,
        name: "S1".into(),
        species: Some("Mus musculus".into()),
        properties: vec![AnimalProperty {
            id: "apr-1".into(),
            name: "Birth Date".into(),
            value: "2025-12-24".into(),
            kind: FieldKind::Date,
            required: true,
        }],
        experiment_ids: vec!["exp-1".into()],
        display_properties: Some(vec!["name".into()]),
        created_at: at,
    });
    AppState {
        projects: vec![project],
        current_project_id: Some("prj-1".into()),
        search_query: "trial".into(),
        filters: Filters {
            query: "s1".into(),
            tags: vec!["pilot".into()],
        },
    }
}

#[test]
fn file_backend_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("research-manager-data.json");
    let state = rich_state();

    let writer = Gateway::new(FileBackend::new(&path));
    assert!(writer.save(&state));

    let reader = Gateway::new(FileBackend::new(&path));
    assert_eq!(reader.load(), state);
}

#[test]
fn key_value_backend_roundtrip() {
    let gateway = Gateway::new(KeyValueBackend::new(MemoryStore::new(1 << 20), "k"));
    let state = rich_state();
    assert!(gateway.save(&state));
    assert_eq!(gateway.load(), state);
}

#[test]
fn identical_state_is_written_once() {
    let gateway = Gateway::new(CountingBackend::default());
    let state = rich_state();

    assert_eq!(gateway.save_if_changed(&state), SaveOutcome::Written);
    assert_eq!(gateway.save_if_changed(&state.clone()), SaveOutcome::Unchanged);
    assert_eq!(gateway.backend().writes.load(Ordering::SeqCst), 1);

    let mut changed = state;
    changed.search_query = "other".into();
    assert_eq!(gateway.save_if_changed(&changed), SaveOutcome::Written);
    assert_eq!(gateway.backend().writes.load(Ordering::SeqCst), 2);
}

#[test]
fn forced_save_ignores_change_detection() {
    let gateway = Gateway::new(CountingBackend::default());
    let state = rich_state();
    assert!(gateway.save(&state));
    assert!(gateway.save(&state));
    assert_eq!(gateway.save_if_changed(&state), SaveOutcome::Unchanged);
    assert_eq!(gateway.backend().writes.load(Ordering::SeqCst), 2);
}

#[test]
fn load_after_startup_does_not_rewrite_unchanged_state() {
    let backend = CountingBackend::default();
    *backend.stored.lock().unwrap() =
        Some(serde_json::to_string_pretty(&rich_state()).unwrap());
    let gateway = Gateway::new(backend);

    let state = gateway.load();
    assert_eq!(gateway.save_if_changed(&state), SaveOutcome::Unchanged);
    assert_eq!(gateway.backend().writes.load(Ordering::SeqCst), 0);
}

#[test]
fn corrupt_file_loads_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{\"projects\": [").unwrap();
    assert_eq!(Gateway::new(FileBackend::new(&path)).load(), AppState::default());
}

#[test]
fn dangling_current_project_is_dropped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(
        &path,
        r#"{"projects": [], "currentProject": {"id": "prj-deleted", "name": "Old"}, "searchQuery": "", "filters": {"query": "", "tags": []}}"#,
    )
    .unwrap();
    let state = Gateway::new(FileBackend::new(&path)).load();
    assert!(state.current_project_id.is_none());
}

#[test]
fn legacy_file_is_migrated_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(
        &path,
        r#"{"projects": [{"id": "p1", "name": "Lab", "description": "", "properties": [], "experiments": [],
            "animals": [{"id": "a1", "name": "Mouse1", "species": "Mus musculus", "weight": "25g"}],
            "createdAt": "2025-01-01T00:00:00.000Z", "updatedAt": "2025-01-01T00:00:00.000Z"}],
           "currentProject": null, "searchQuery": "", "filters": {"query": "", "tags": []}}"#,
    )
    .unwrap();
    let state = Gateway::new(FileBackend::new(&path)).load();
    let animal = &state.projects[0].animals[0];
    assert_eq!(animal.property("Weight").unwrap().value, "25g");
    assert_eq!(animal.property("Species").unwrap().value, "Mus musculus");
}

#[test]
fn null_collections_and_timestamps_do_not_drop_the_project() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(
        &path,
        r#"{"projects": [{"id": "p1", "name": "Lab", "experiments": null, "createdAt": null, "updatedAt": null,
            "animals": [
              {"id": "a1", "name": "M1", "type": "animal", "properties": [], "experimentIds": null, "createdAt": "2025-01-01T00:00:00.000Z"},
              {"id": "a2", "name": "M2", "type": "sample", "properties": [], "displayProperties": null, "createdAt": null}
            ]}],
           "currentProject": {"id": "p1"}, "searchQuery": "", "filters": {"query": "", "tags": []}}"#,
    )
    .unwrap();
    let gateway = Gateway::new(FileBackend::new(&path));
    let state = gateway.load();
    assert_eq!(state.projects.len(), 1);
    assert_eq!(state.current_project_id.as_deref(), Some("p1"));
    let project = &state.projects[0];
    assert_eq!(project.animals.len(), 2);
    assert!(project.animals[0].experiment_ids.is_empty());
    assert_eq!(project.animals[1].display_properties, Some(Vec::new()));

    assert!(gateway.save(&state));
    assert_eq!(Gateway::new(FileBackend::new(&path)).load(), state);
}
