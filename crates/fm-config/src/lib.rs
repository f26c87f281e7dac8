//! # fm-config
//!
//! Layered configuration loading for FileMap using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FILEMAP_*` prefix, `__` as separator)
//! 2. Project-level `.filemap/config.toml`
//! 3. User-level `~/.config/filemap/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FILEMAP_STORAGE__BACKEND` -> `storage.backend`,
//! `FILEMAP_AUTOSAVE__INTERVAL_SECS` -> `autosave.interval_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use fm_config::FmConfig;
//!
//! let config = FmConfig::load_with_dotenv().expect("config");
//! println!("state file: {}", config.storage.state_file_path().display());
//! ```

mod autosave;
mod error;
mod general;
mod storage;

pub use autosave::AutosaveConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use storage::{BackendChoice, StorageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FmConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub autosave: AutosaveConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl FmConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".filemap/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("FILEMAP_").split("__"))
    }

    /// # Errors
    ///
    /// Returns the first invalid section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storage.validate()?;
        self.autosave.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("filemap").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FmConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.backend, BackendChoice::Auto);
        assert_eq!(config.autosave.interval_secs, 10);
        assert_eq!(config.general.default_limit, 20);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = FmConfig::from_figment(&FmConfig::figment())
                .map_err(|e| figment::Error::from(e.to_string()))?;
            assert_eq!(config.autosave.exit_grace_millis, 2500);
            Ok(())
        });
    }
}
