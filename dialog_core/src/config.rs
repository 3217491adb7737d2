//! Simulator configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Seed used when none is supplied.
pub const DEFAULT_SEED: i64 = 1234;

/// What a run does when it reaches an id that names no node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DanglingPolicy {
    /// Fail the whole run with [`crate::SimError::DanglingReference`].
    #[default]
    Abort,
    /// Log the dangling id and end the walk normally, like loop detection.
    Stop,
}

impl std::str::FromStr for DanglingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(DanglingPolicy::Abort),
            "stop" => Ok(DanglingPolicy::Stop),
            other => Err(format!(
                "unknown dangling policy '{}' (expected 'abort' or 'stop')",
                other
            )),
        }
    }
}

/// Configuration for a single simulation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatorConfig {
    pub on_dangling: DanglingPolicy,
}

/// Settings file for the harness. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Seed used when the caller does not pass one.
    #[serde(default = "default_seed")]
    pub seed: i64,

    #[serde(default)]
    pub on_dangling: DanglingPolicy,

    /// Pretty-print the JSON record.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_seed() -> i64 {
    DEFAULT_SEED
}

fn default_pretty() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            on_dangling: DanglingPolicy::default(),
            pretty: true,
        }
    }
}

/// Failure to read a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// The part of the settings a [`crate::Simulator`] consumes.
    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            on_dangling: self.on_dangling,
        }
    }
}
