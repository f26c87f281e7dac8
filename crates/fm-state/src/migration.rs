//! Structural migration of persisted state documents.
//!
//! Documents carry no version tag, so older shapes are detected by structure:
//!
//! - An animal with top-level `age`, `weight`, or `notes` keys is a legacy
//!   record. Its scalars are rewritten into a `properties` list with stable
//!   `migrated_{id}_*` IDs and the legacy keys are dropped.
//! - Every project gets `animalProperties`, and every animal gets
//!   `experimentIds` and `displayProperties`, when missing or `null`. Missing
//!   or `null` timestamps are stamped with the migration time.
//!
//! Migration works on raw JSON and never fails. Anything that is not shaped
//! like a project or animal is passed through untouched, so running it on its
//! own output changes nothing.

use chrono::{DateTime, SecondsFormat, Utc};
use fm_core::entities::Project;
use fm_core::state::{AppState, Filters};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::error::StateError;

const LEGACY_KEYS: [&str; 3] = ["age", "weight", "notes"];

/// Migrate a raw document to the current shape, stamping missing animal
/// creation times with the current time.
#[must_use]
pub fn migrate(document: Value) -> Value {
    migrate_at(document, Utc::now())
}

/// [`migrate`] with an explicit clock.
#[must_use]
pub fn migrate_at(mut document: Value, now: DateTime<Utc>) -> Value {
    let Some(projects) = document
        .get_mut("projects")
        .and_then(Value::as_array_mut)
    else {
        return document;
    };
    for project in projects.iter_mut().filter_map(Value::as_object_mut) {
        migrate_project(project, now);
    }
    document
}

/// Migrate and type a raw document.
///
/// Projects that still fail to deserialize after migration are dropped with a
/// warning rather than discarding the whole document.
///
/// # Errors
///
/// Returns `StateError::Document` only when `document` is not a JSON object.
pub fn into_state(document: Value) -> Result<AppState, StateError> {
    let migrated = migrate(document);
    match serde_json::from_value::<AppState>(migrated.clone()) {
        Ok(state) => Ok(state),
        Err(error) => {
            if !migrated.is_object() {
                return Err(StateError::Document(error));
            }
            warn!(%error, "state document partially invalid, salvaging projects");
            Ok(salvage(&migrated))
        }
    }
}

fn salvage(document: &Value) -> AppState {
    let projects: Vec<Project> = document
        .get("projects")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match serde_json::from_value(item.clone()) {
                    Ok(project) => Some(project),
                    Err(error) => {
                        let id = item.get("id").and_then(Value::as_str).unwrap_or("?");
                        warn!(project = id, %error, "dropping unreadable project");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let search_query = document
        .get("searchQuery")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let filters: Filters = document
        .get("filters")
        .and_then(|f| serde_json::from_value(f.clone()).ok())
        .unwrap_or_default();
    let mut state = AppState {
        projects,
        current_project_id: document
            .pointer("/currentProject/id")
            .and_then(Value::as_str)
            .map(str::to_string),
        search_query,
        filters,
    };
    state.drop_dangling_selection();
    state
}

fn timestamp(now: DateTime<Utc>) -> Value {
    json!(now.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Insert `default` when `key` is missing or `null`.
fn fill(fields: &mut Map<String, Value>, key: &str, default: impl FnOnce() -> Value) {
    if fields.get(key).is_none_or(Value::is_null) {
        fields.insert(key.to_string(), default());
    }
}

fn migrate_project(project: &mut Map<String, Value>, now: DateTime<Utc>) {
    if !project.get("animalProperties").is_some_and(Value::is_array) {
        project.insert("animalProperties".into(), json!([]));
    }
    for key in ["properties", "experiments", "animals"] {
        fill(project, key, || json!([]));
    }
    for key in ["createdAt", "updatedAt"] {
        fill(project, key, || timestamp(now));
    }
    let Some(animals) = project.get_mut("animals").and_then(Value::as_array_mut) else {
        return;
    };
    for animal in animals.iter_mut() {
        if let Some(fields) = animal.as_object_mut() {
            if is_legacy(fields) {
                *fields = migrate_legacy_animal(fields, now);
            }
            fill(fields, "properties", || json!([]));
            fill(fields, "experimentIds", || json!([]));
            fill(fields, "displayProperties", || json!([]));
            fill(fields, "createdAt", || timestamp(now));
        }
    }
}

fn is_legacy(animal: &Map<String, Value>) -> bool {
    LEGACY_KEYS.iter().any(|key| animal.contains_key(*key))
}

/// Non-empty string value of `key`, if any.
fn text<'a>(animal: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    animal
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn migrated_field(animal_id: &str, suffix: &str, name: &str, value: &str, kind: &str) -> Value {
    json!({
        "id": format!("migrated_{animal_id}_{suffix}"),
        "name": name,
        "value": value,
        "type": kind,
    })
}

fn migrate_legacy_animal(legacy: &Map<String, Value>, now: DateTime<Utc>) -> Map<String, Value> {
    let id = legacy.get("id").and_then(Value::as_str).unwrap_or_default();
    let name = legacy.get("name").and_then(Value::as_str).unwrap_or_default();
    debug!(animal = id, "migrating legacy animal record");

    let mut properties = vec![json!({
        "id": format!("migrated_{id}_name"),
        "name": "Animal ID",
        "value": name,
        "type": "text",
        "required": true,
    })];
    let optional = [
        ("species", "species", "Species", "text"),
        ("age", "age", "Date of Birth or Age", "text"),
        ("weight", "weight", "Weight", "text"),
        ("notes", "notes", "Notes", "textarea"),
    ];
    for (key, suffix, label, kind) in optional {
        if let Some(value) = text(legacy, key) {
            properties.push(migrated_field(id, suffix, label, value, kind));
        }
    }

    let mut animal = Map::new();
    animal.insert("id".into(), json!(id));
    animal.insert("type".into(), json!("animal"));
    animal.insert("name".into(), json!(name));
    if let Some(species) = legacy.get("species").filter(|s| !s.is_null()) {
        animal.insert("species".into(), species.clone());
    }
    animal.insert("properties".into(), Value::Array(properties));
    animal.insert(
        "experimentIds".into(),
        legacy
            .get("experimentIds")
            .filter(|v| v.is_array())
            .cloned()
            .unwrap_or_else(|| json!([])),
    );
    animal.insert(
        "displayProperties".into(),
        legacy
            .get("displayProperties")
            .filter(|v| v.is_array())
            .cloned()
            .unwrap_or_else(|| json!(["name", "species"])),
    );
    animal.insert(
        "createdAt".into(),
        legacy
            .get("createdAt")
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| timestamp(now)),
    );
    animal
}
