//! # fm-state
//!
//! In-memory state management for FileMap.
//!
//! - [`migration`] normalizes persisted documents of older shapes.
//! - [`action::Action`] is the catalog of every mutation.
//! - [`reducer`] applies actions: [`reducer::apply`] reports unknown IDs,
//!   [`reducer::reduce`] is the total form that ignores them.
//! - [`updates`] holds the partial-update builders carried by update actions.
//! - [`queries`] are read-side lookups and searches.
//! - [`store::AppStore`] owns the state, funnels every mutation through
//!   `dispatch`, and publishes snapshots for the autosaver.

pub mod action;
pub mod error;
pub mod migration;
pub mod queries;
pub mod reducer;
pub mod store;
pub mod updates;

pub use action::Action;
pub use error::StateError;
pub use reducer::{apply, reduce};
pub use store::AppStore;
