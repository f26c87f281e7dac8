//! Animal update builder.

use fm_core::entities::{Animal, AnimalProperty};
use fm_core::enums::AnimalKind;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AnimalKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<AnimalProperty>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiment_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_properties: Option<Option<Vec<String>>>,
}

impl AnimalUpdate {
    pub(crate) fn merge_into(self, animal: &mut Animal) {
        if let Some(kind) = self.kind {
            animal.kind = kind;
        }
        if let Some(name) = self.name {
            animal.name = name;
        }
        if let Some(species) = self.species {
            animal.species = species;
        }
        if let Some(properties) = self.properties {
            animal.properties = properties;
        }
        if let Some(ids) = self.experiment_ids {
            animal.experiment_ids = ids;
        }
        if let Some(display) = self.display_properties {
            animal.display_properties = display;
        }
    }
}

pub struct AnimalUpdateBuilder(AnimalUpdate);

impl AnimalUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AnimalUpdate::default())
    }

    #[must_use]
    pub const fn kind(mut self, kind: AnimalKind) -> Self {
        self.0.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn species(mut self, species: Option<String>) -> Self {
        self.0.species = Some(species);
        self
    }

    #[must_use]
    pub fn properties(mut self, properties: Vec<AnimalProperty>) -> Self {
        self.0.properties = Some(properties);
        self
    }

    #[must_use]
    pub fn experiment_ids(mut self, ids: Vec<String>) -> Self {
        self.0.experiment_ids = Some(ids);
        self
    }

    #[must_use]
    pub fn display_properties(mut self, display: Option<Vec<String>>) -> Self {
        self.0.display_properties = Some(display);
        self
    }

    #[must_use]
    pub fn build(self) -> AnimalUpdate {
        self.0
    }
}

impl Default for AnimalUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
