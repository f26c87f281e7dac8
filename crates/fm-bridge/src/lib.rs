//! # fm-bridge
//!
//! File operations the desktop host offers the organizer: picking a file or
//! folder to bind, opening a bound path in its native application, and
//! checking or describing a path.
//!
//! Pickers and launchers are traits so the CLI can supply paths given on the
//! command line and tests can record launches instead of spawning programs.

pub mod error;
pub mod host;
pub mod launcher;
pub mod picker;

pub use error::BridgeError;
pub use host::HostBridge;
pub use launcher::{Launcher, SystemLauncher};
pub use picker::{PathPicker, PresetPicker};
