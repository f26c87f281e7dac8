//! Entity structs for all FileMap domain objects.
//!
//! Field names serialize in camelCase and kind fields serialize as `type`,
//! matching the state documents written by the desktop app. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema`.

mod animal;
mod experiment;
mod field_def;
mod project;
mod property;

pub use animal::{Animal, AnimalProperty};
pub use experiment::{Experiment, ExperimentProperty};
pub use field_def::ProjectAnimalProperty;
pub use project::Project;
pub use property::Property;
