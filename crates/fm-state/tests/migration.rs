//! Migration of legacy and partial state documents.

use chrono::{TimeZone, Utc};
use fm_core::enums::AnimalKind;
use fm_state::migration::{into_state, migrate, migrate_at};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn legacy_document() -> Value {
    json!({
        "projects": [{
            "id": "p1",
            "name": "Lab1",
            "description": "",
            "properties": [],
            "experiments": [],
            "animals": [{
                "id": "a1",
                "name": "Mouse1",
                "species": "Mus musculus",
                "age": "3mo",
                "weight": "25g",
                "notes": "healthy"
            }],
            "createdAt": "2025-01-01T00:00:00.000Z",
            "updatedAt": "2025-01-01T00:00:00.000Z"
        }],
        "currentProject": null,
        "searchQuery": "",
        "filters": {"query": "", "tags": []}
    })
}

#[test]
fn legacy_mouse_becomes_property_bag() {
    let state = into_state(legacy_document()).unwrap();
    let animal = &state.projects[0].animals[0];

    assert_eq!(animal.kind, AnimalKind::Animal);
    assert_eq!(
        animal.display_properties,
        Some(vec!["name".to_string(), "species".to_string()])
    );

    let mut pairs: Vec<(&str, &str)> = animal
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.value.as_str()))
        .collect();
    pairs.sort_unstable();
    assert_eq!(
        pairs,
        vec![
            ("Animal ID", "Mouse1"),
            ("Date of Birth or Age", "3mo"),
            ("Notes", "healthy"),
            ("Species", "Mus musculus"),
            ("Weight", "25g"),
        ]
    );
    assert!(animal.property("Animal ID").unwrap().required);
}

#[rstest]
#[case::legacy(legacy_document())]
#[case::current(json!({"projects": [{"id": "p", "name": "P", "animals": [{"id": "a", "name": "A", "type": "sample", "properties": []}]}]}))]
#[case::bare(json!({"projects": [{"id": "p"}]}))]
#[case::empty(json!({}))]
#[case::not_an_object(json!("junk"))]
#[case::animals_not_array(json!({"projects": [{"id": "p", "animals": 3}]}))]
#[case::null_links(json!({"projects": [{"id": "p", "animals": [{"id": "a", "experimentIds": null, "displayProperties": null}]}]}))]
#[case::null_timestamps(json!({"projects": [{"id": "p", "createdAt": null, "updatedAt": null, "animals": [{"id": "a", "createdAt": null}]}]}))]
fn migration_is_idempotent(#[case] input: Value) {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let once = migrate_at(input, now);
    let twice = migrate_at(once.clone(), now);
    assert_eq!(twice, once);
}

#[test]
fn second_pass_with_later_clock_changes_nothing() {
    let once = migrate(legacy_document());
    let later = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(migrate_at(once.clone(), later), once);
}

#[test]
fn missing_created_at_is_stamped() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let migrated = migrate_at(
        json!({"projects": [{"id": "p", "animals": [{"id": "a", "age": "1w"}]}]}),
        now,
    );
    assert_eq!(
        migrated["projects"][0]["animals"][0]["createdAt"],
        "2026-03-01T12:00:00.000Z"
    );
}

#[rstest]
#[case::experiment_ids(json!({"id": "a1", "name": "M1", "experimentIds": null, "createdAt": "2025-01-01T00:00:00Z"}))]
#[case::display_properties(json!({"id": "a1", "name": "M1", "displayProperties": null, "createdAt": "2025-01-01T00:00:00Z"}))]
#[case::created_at(json!({"id": "a1", "name": "M1", "createdAt": null}))]
#[case::properties(json!({"id": "a1", "name": "M1", "properties": null, "createdAt": "2025-01-01T00:00:00Z"}))]
fn null_animal_fields_keep_the_project(#[case] animal: Value) {
    let document = json!({
        "projects": [{
            "id": "p1",
            "name": "Lab",
            "animals": [animal],
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": null
        }]
    });
    let state = into_state(document).unwrap();
    assert_eq!(state.projects.len(), 1);
    let animal = &state.projects[0].animals[0];
    assert_eq!(animal.id, "a1");
    assert!(animal.experiment_ids.is_empty());
}

#[test]
fn null_animal_fields_get_empty_defaults() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let migrated = migrate_at(
        json!({"projects": [{"id": "p", "animals": [{"id": "a", "experimentIds": null, "displayProperties": null, "createdAt": null}]}]}),
        now,
    );
    let animal = &migrated["projects"][0]["animals"][0];
    assert_eq!(animal["experimentIds"], json!([]));
    assert_eq!(animal["displayProperties"], json!([]));
    assert_eq!(animal["createdAt"], "2026-03-01T12:00:00.000Z");
}
