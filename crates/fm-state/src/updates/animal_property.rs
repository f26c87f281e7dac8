//! Update builder for project-level animal field definitions.

use fm_core::entities::ProjectAnimalProperty;
use fm_core::enums::{AppliesTo, FieldKind};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalPropertyDefUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<AppliesTo>,
}

impl AnimalPropertyDefUpdate {
    pub(crate) fn merge_into(self, def: &mut ProjectAnimalProperty) {
        if let Some(name) = self.name {
            def.name = name;
        }
        if let Some(kind) = self.kind {
            def.kind = kind;
        }
        if let Some(required) = self.required {
            def.required = required;
        }
        if let Some(default_value) = self.default_value {
            def.default_value = default_value;
        }
        if let Some(options) = self.options {
            def.options = options;
        }
        if let Some(order) = self.order {
            def.order = order;
        }
        if let Some(applies_to) = self.applies_to {
            def.applies_to = applies_to;
        }
    }
}

pub struct AnimalPropertyDefUpdateBuilder(AnimalPropertyDefUpdate);

impl AnimalPropertyDefUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AnimalPropertyDefUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn kind(mut self, kind: FieldKind) -> Self {
        self.0.kind = Some(kind);
        self
    }

    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.0.required = Some(required);
        self
    }

    #[must_use]
    pub fn default_value(mut self, default_value: Option<String>) -> Self {
        self.0.default_value = Some(default_value);
        self
    }

    #[must_use]
    pub fn options(mut self, options: Vec<String>) -> Self {
        self.0.options = Some(options);
        self
    }

    #[must_use]
    pub const fn order(mut self, order: i32) -> Self {
        self.0.order = Some(order);
        self
    }

    #[must_use]
    pub const fn applies_to(mut self, applies_to: AppliesTo) -> Self {
        self.0.applies_to = Some(applies_to);
        self
    }

    #[must_use]
    pub fn build(self) -> AnimalPropertyDefUpdate {
        self.0
    }
}

impl Default for AnimalPropertyDefUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
