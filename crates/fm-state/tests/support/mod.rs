//! Entity fixtures shared by the integration tests.

#![allow(dead_code)]

use chrono::Utc;
use fm_core::entities::{Animal, Experiment, ExperimentProperty, Project, ProjectAnimalProperty, Property};
use fm_core::enums::{AnimalKind, AppliesTo, FieldKind, PropertyKind};
use fm_core::state::AppState;

pub fn project(id: &str, name: &str) -> Project {
    Project::new(id, name, Utc::now())
}

pub fn experiment(id: &str, name: &str) -> Experiment {
    let now = Utc::now();
    Experiment {
        id: id.into(),
        name: name.into(),
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

pub fn animal(id: &str, name: &str) -> Animal {
    Animal {
        id: id.into(),
        kind: AnimalKind::Animal,
        name: name.into(),
        species: None,
        properties: Vec::new(),
        experiment_ids: Vec::new(),
        display_properties: None,
        created_at: Utc::now(),
    }
}

pub fn property(id: &str, name: &str, kind: PropertyKind) -> Property {
    Property {
        id: id.into(),
        name: name.into(),
        kind,
        custom_type: None,
    }
}

pub fn file_binding(property_id: &str, path: &str) -> ExperimentProperty {
    ExperimentProperty {
        property_id: property_id.into(),
        file_path: Some(path.into()),
        file_name: path.rsplit('/').next().map(str::to_string),
        folder_path: None,
    }
}

pub fn field_def(id: &str, name: &str, default_value: Option<&str>) -> ProjectAnimalProperty {
    ProjectAnimalProperty {
        id: id.into(),
        name: name.into(),
        kind: FieldKind::Text,
        required: false,
        default_value: default_value.map(str::to_string),
        options: Vec::new(),
        is_custom: true,
        order: 0,
        applies_to: AppliesTo::Both,
    }
}

/// Two projects, each with one experiment bound to a shared-looking property ID.
pub fn two_labs() -> AppState {
    let mut a = project("prj-a", "Lab A");
    let mut b = project("prj-b", "Lab B");
    for p in [&mut a, &mut b] {
        p.properties.push(property("prp-raw", "Raw", PropertyKind::RawData));
        let mut exp = experiment(&format!("exp-{}", p.id), "Trial");
        exp.properties.push(file_binding("prp-raw", "/data/raw.csv"));
        p.experiments.push(exp);
        p.animals.push(animal(&format!("ani-{}", p.id), "M1"));
    }
    AppState {
        projects: vec![a, b],
        ..AppState::default()
    }
}
