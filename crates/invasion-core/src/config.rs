//! Configuration loading and typed config structures for the invasion
//! simulation.
//!
//! The optional configuration file is `invasion-config.yaml`. Every field has
//! a default, so an empty document (or no file at all) is a valid
//! configuration:
//!
//! ```yaml
//! simulation:
//!   max_moves: 10000
//!   seed: 42
//! logging:
//!   level: warn
//!   narrate: true
//! ```
//!
//! Environment variables override the file:
//! - `INVASION_SEED` overrides `simulation.seed`
//! - `INVASION_MAX_MOVES` overrides `simulation.max_moves`

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::scenario::DEFAULT_MAX_MOVES;

/// Environment variable overriding `simulation.seed`.
pub const SEED_ENV: &str = "INVASION_SEED";

/// Environment variable overriding `simulation.max_moves`.
pub const MAX_MOVES_ENV: &str = "INVASION_MAX_MOVES";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level invasion configuration.
///
/// Mirrors the structure of `invasion-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InvasionConfig {
    /// Run parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Logging and narration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl InvasionConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment overrides are applied and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `INVASION_SEED` and `INVASION_MAX_MOVES` from the process
    /// environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Values that do not parse are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(SEED_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.simulation.seed = Some(seed),
                Err(error) => warn!(variable = SEED_ENV, value = %raw, %error, "ignoring override"),
            }
        }
        if let Some(raw) = lookup(MAX_MOVES_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(max_moves) => self.simulation.max_moves = max_moves,
                Err(error) => {
                    warn!(variable = MAX_MOVES_ENV, value = %raw, %error, "ignoring override");
                }
            }
        }
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `simulation.max_moves` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.max_moves == 0 {
            return Err(ConfigError::Invalid {
                reason: String::from("simulation.max_moves must be at least 1"),
            });
        }
        Ok(())
    }
}

/// Run parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Moves each alien may make before it stops.
    #[serde(default = "default_max_moves")]
    pub max_moves: u32,

    /// Seed for the random generator. A fresh seed is drawn when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_moves: default_max_moves(),
            seed: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG`
    /// is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Print a line to stderr for every destroyed city.
    #[serde(default = "default_narrate")]
    pub narrate: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            narrate: default_narrate(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_max_moves() -> u32 {
    DEFAULT_MAX_MOVES
}

fn default_log_level() -> String {
    String::from("warn")
}

const fn default_narrate() -> bool {
    true
}
