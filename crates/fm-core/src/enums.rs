//! Kind enums for properties, animals, and animal field definitions.
//!
//! Wire names follow the document format written by earlier releases of the
//! desktop app (`rawData`, `textarea`, ...), so every enum pins its serde
//! spelling explicitly. `as_str()` returns the same spelling.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PropertyKind
// ---------------------------------------------------------------------------

/// Kind of a project-level experiment property definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKind {
    Notes,
    Protocol,
    RawData,
    Results,
    Custom,
    Folder,
}

impl PropertyKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Protocol => "protocol",
            Self::RawData => "rawData",
            Self::Results => "results",
            Self::Custom => "custom",
            Self::Folder => "folder",
        }
    }

    /// Folder properties bind a directory; every other kind binds a file.
    #[must_use]
    pub const fn binds_folder(self) -> bool {
        matches!(self, Self::Folder)
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AnimalKind
// ---------------------------------------------------------------------------

/// Discriminator for tracked subjects: a live animal or a sample.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum AnimalKind {
    #[default]
    Animal,
    Sample,
}

impl AnimalKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Animal => "animal",
            Self::Sample => "sample",
        }
    }
}

impl fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Presentation kind of an animal field. Values are always stored as strings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Date,
    Select,
    TextArea,
}

impl FieldKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Select => "select",
            Self::TextArea => "textarea",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AppliesTo
// ---------------------------------------------------------------------------

/// Which animal kinds a project-level field definition targets.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum AppliesTo {
    Animal,
    Sample,
    #[default]
    Both,
}

impl AppliesTo {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Animal => "animal",
            Self::Sample => "sample",
            Self::Both => "both",
        }
    }

    #[must_use]
    pub const fn includes(self, kind: AnimalKind) -> bool {
        matches!(
            (self, kind),
            (Self::Both, _) | (Self::Animal, AnimalKind::Animal) | (Self::Sample, AnimalKind::Sample)
        )
    }
}

impl fmt::Display for AppliesTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
