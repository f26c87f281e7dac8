//! Autosave timing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default period between change-detected saves.
const fn default_interval_secs() -> u64 {
    10
}

/// Default window granted to the exit save before the process leaves anyway.
const fn default_exit_grace_millis() -> u64 {
    2500
}

const fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AutosaveConfig {
    /// Whether the periodic autosave runs during interactive sessions.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between autosave ticks.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Milliseconds the forced exit save may take.
    #[serde(default = "default_exit_grace_millis")]
    pub exit_grace_millis: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_secs: default_interval_secs(),
            exit_grace_millis: default_exit_grace_millis(),
        }
    }
}

impl AutosaveConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub const fn exit_grace(&self) -> Duration {
        Duration::from_millis(self.exit_grace_millis)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "autosave.interval_secs".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_desktop_timings() {
        let config = AutosaveConfig::default();
        assert!(config.enabled);
        assert_eq!(config.interval(), Duration::from_secs(10));
        assert_eq!(config.exit_grace(), Duration::from_millis(2500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = AutosaveConfig {
            interval_secs: 0,
            ..AutosaveConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("autosave.interval_secs"));
    }
}
