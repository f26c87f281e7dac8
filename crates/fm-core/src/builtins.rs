//! Built-in animal field catalog and the default properties of new projects.
//!
//! Built-in definitions are not stored on the project. They are synthesized
//! on read unless their ID appears in `Project::deleted_built_in_properties`.

use crate::entities::{Project, ProjectAnimalProperty, Property};
use crate::enums::{AppliesTo, FieldKind, PropertyKind};
use crate::errors::CoreError;
use crate::ids::{PREFIX_PROPERTY, generate_id};

struct BuiltIn {
    id: &'static str,
    name: &'static str,
    kind: FieldKind,
    order: i32,
    applies_to: AppliesTo,
}

const BUILT_INS: &[BuiltIn] = &[
    BuiltIn {
        id: "birthDate",
        name: "Birth Date",
        kind: FieldKind::Date,
        order: -6,
        applies_to: AppliesTo::Animal,
    },
    BuiltIn {
        id: "age",
        name: "Age",
        kind: FieldKind::Text,
        order: -5,
        applies_to: AppliesTo::Animal,
    },
    BuiltIn {
        id: "weight",
        name: "Weight",
        kind: FieldKind::Text,
        order: -4,
        applies_to: AppliesTo::Animal,
    },
    BuiltIn {
        id: "sex",
        name: "Sex",
        kind: FieldKind::Text,
        order: -3,
        applies_to: AppliesTo::Animal,
    },
    BuiltIn {
        id: "condition",
        name: "Condition",
        kind: FieldKind::Text,
        order: -2,
        applies_to: AppliesTo::Animal,
    },
    BuiltIn {
        id: "notes",
        name: "Notes",
        kind: FieldKind::TextArea,
        order: -1,
        applies_to: AppliesTo::Both,
    },
];

#[must_use]
pub fn is_built_in(id: &str) -> bool {
    BUILT_INS.iter().any(|b| b.id == id)
}

/// The full built-in catalog as field definitions.
#[must_use]
pub fn built_in_animal_properties() -> Vec<ProjectAnimalProperty> {
    BUILT_INS
        .iter()
        .map(|b| ProjectAnimalProperty {
            id: b.id.to_string(),
            name: b.name.to_string(),
            kind: b.kind,
            required: false,
            default_value: Some(String::new()),
            options: Vec::new(),
            is_custom: false,
            order: b.order,
            applies_to: b.applies_to,
        })
        .collect()
}

/// Built-ins the project has not deleted, followed by its custom definitions,
/// stably sorted by `order`.
#[must_use]
pub fn effective_animal_properties(project: &Project) -> Vec<ProjectAnimalProperty> {
    let mut all: Vec<ProjectAnimalProperty> = built_in_animal_properties()
        .into_iter()
        .filter(|b| !project.deleted_built_in_properties.contains(&b.id))
        .filter(|b| !project.animal_properties.iter().any(|c| c.id == b.id))
        .collect();
    all.extend(project.animal_properties.iter().cloned());
    all.sort_by_key(|p| p.order);
    all
}

/// File properties a newly created project starts with: Notes, Protocol,
/// and Raw Data, each with a fresh ID.
///
/// # Errors
///
/// Returns `CoreError` if ID generation fails.
pub fn default_project_properties() -> Result<Vec<Property>, CoreError> {
    [
        ("Notes", PropertyKind::Notes),
        ("Protocol", PropertyKind::Protocol),
        ("Raw Data", PropertyKind::RawData),
    ]
    .into_iter()
    .map(|(name, kind)| {
        Ok(Property {
            id: generate_id(PREFIX_PROPERTY)?,
            name: name.to_string(),
            kind,
            custom_type: None,
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn custom(id: &str, order: i32) -> ProjectAnimalProperty {
        ProjectAnimalProperty {
            id: id.into(),
            name: id.to_uppercase(),
            kind: FieldKind::Text,
            required: false,
            default_value: None,
            options: Vec::new(),
            is_custom: true,
            order,
            applies_to: AppliesTo::Both,
        }
    }

    #[test]
    fn catalog_is_ordered_and_negative() {
        let all = built_in_animal_properties();
        assert_eq!(all.len(), 6);
        assert!(all.windows(2).all(|w| w[0].order < w[1].order));
        assert!(all.iter().all(|p| p.order < 0 && !p.is_custom));
    }

    #[test]
    fn effective_puts_custom_after_built_ins() {
        let mut project = Project::new("prj-1", "Lab", Utc::now());
        project.animal_properties = vec![custom("cage", 0), custom("diet", 1)];

        let ids: Vec<String> = effective_animal_properties(&project)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(
            ids,
            vec!["birthDate", "age", "weight", "sex", "condition", "notes", "cage", "diet"]
        );
    }

    #[test]
    fn deleted_built_ins_are_not_resynthesized() {
        let mut project = Project::new("prj-1", "Lab", Utc::now());
        project.deleted_built_in_properties = vec!["weight".into(), "notes".into()];

        let ids: Vec<String> = effective_animal_properties(&project)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["birthDate", "age", "sex", "condition"]);
    }

    #[test]
    fn stored_override_replaces_synthesized_built_in() {
        let mut project = Project::new("prj-1", "Lab", Utc::now());
        let mut sex = custom("sex", -3);
        sex.kind = FieldKind::Select;
        sex.options = vec!["male".into(), "female".into()];
        project.animal_properties = vec![sex.clone()];

        let effective = effective_animal_properties(&project);
        let found: Vec<_> = effective.iter().filter(|p| p.id == "sex").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0], &sex);
    }

    #[test]
    fn is_built_in_recognizes_catalog() {
        assert!(is_built_in("birthDate"));
        assert!(!is_built_in("cage"));
        assert_eq!(built_in_animal_properties().len(), 6);
    }

    #[test]
    fn new_projects_get_three_default_properties() {
        let props = default_project_properties().unwrap();
        let names: Vec<&str> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Notes", "Protocol", "Raw Data"]);
        assert_eq!(props[2].kind, PropertyKind::RawData);
        assert!(props.iter().all(|p| p.id.starts_with("prp-")));
        assert_ne!(props[0].id, props[1].id);
    }
}
