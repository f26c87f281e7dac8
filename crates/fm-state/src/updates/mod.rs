//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields are merged into the target entity; everything else is left as is.
//! Clearable optionals use `Option<Option<T>>`: `Some(None)` clears the field.

pub mod animal;
pub mod animal_property;
pub mod experiment;
pub mod project;

pub use animal::{AnimalUpdate, AnimalUpdateBuilder};
pub use animal_property::{AnimalPropertyDefUpdate, AnimalPropertyDefUpdateBuilder};
pub use experiment::{ExperimentUpdate, ExperimentUpdateBuilder};
pub use project::{ProjectUpdate, ProjectUpdateBuilder};
