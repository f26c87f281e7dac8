//! # fm-core
//!
//! Core types, ID generation, and error types for FileMap.
//!
//! This crate provides the foundational types shared across all FileMap crates:
//! - Entity structs for the research domain (projects, experiments, animals, properties)
//! - The top-level `AppState` and its on-disk document shape
//! - Kind enums and typed field values for the dynamic animal schema
//! - The built-in animal field catalog
//! - ID prefix constants and generation
//! - Export envelope and host-bridge wire types
//! - Cross-cutting error types

pub mod builtins;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod field_value;
pub mod host;
pub mod ids;
pub mod state;
pub mod transfer;
