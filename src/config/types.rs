//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::defaults::{default_server_name, default_true};
use super::limits::LimitsConfig;
use super::listen::ListenConfig;
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server information.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    pub listen: ListenConfig,
    /// Per-connection limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Output decoration.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(content)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Server identity and behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Name used in logs.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Announce "<name> has left the chat" when a client drops without `!exit`.
    #[serde(default = "default_true")]
    pub announce_disconnects: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            announce_disconnects: true,
        }
    }
}

/// Output decoration configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    /// Decorate output with ANSI escape sequences for terminal clients.
    #[serde(default)]
    pub ansi: bool,
}
