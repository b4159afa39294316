use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/update-gate/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("update-gate").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Both thresholds are at least 1, so a malformed priority (read as 0)
    ///   never reaches one
    /// - The medium threshold does not exceed the high threshold
    /// - Replay intervals are not negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let policy = &self.policy;

        for (name, value) in [
            ("high_priority_threshold", policy.high_priority_threshold),
            ("medium_priority_threshold", policy.medium_priority_threshold),
        ] {
            if value < 1 {
                return Err(ConfigError::ValidationError {
                    message: format!("{} must be at least 1, got {}", name, value),
                });
            }
        }

        if policy.medium_priority_threshold > policy.high_priority_threshold {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "medium_priority_threshold ({}) exceeds high_priority_threshold ({})",
                    policy.medium_priority_threshold, policy.high_priority_threshold
                ),
            });
        }

        for (name, value) in [
            ("medium_replay_interval_days", policy.medium_replay_interval_days),
            ("low_replay_interval_days", policy.low_replay_interval_days),
        ] {
            if value < 0 {
                return Err(ConfigError::ValidationError {
                    message: format!("{} must not be negative, got {}", name, value),
                });
            }
        }

        Ok(())
    }
}
