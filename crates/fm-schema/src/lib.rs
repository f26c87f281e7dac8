//! # fm-schema
//!
//! JSON Schema generation, validation, and registry for FileMap.
//!
//! This crate provides:
//! - `SchemaRegistry`: central store of the JSON Schemas for every persisted type
//! - Validation of state documents and backup files before they are loaded
//! - Schema export for external tooling (`filemap schema` command)
//!
//! ## Architecture
//!
//! Entity types are defined in `fm-core` with `#[derive(JsonSchema)]`.
//! This crate imports those types and provides the registry and validation
//! layer. `fm-storage` validates imports against it; `fm-cli` prints schemas.

pub mod error;
pub mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
