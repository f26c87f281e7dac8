//! State error types for fm-state.

use thiserror::Error;

/// Errors from dispatching actions or typing migrated documents.
#[derive(Debug, Error)]
pub enum StateError {
    /// The action addressed an entity that does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A migrated document could not be read as application state.
    #[error("Invalid state document: {0}")]
    Document(#[from] serde_json::Error),

    /// Error bubbled up from fm-core (ID generation, value validation).
    #[error(transparent)]
    Core(#[from] fm_core::errors::CoreError),
}

impl StateError {
    pub(crate) fn not_found(entity: &'static str, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
