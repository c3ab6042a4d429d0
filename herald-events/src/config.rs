// Event service configuration

use crate::error::ConfigError;
use crate::service::EventService;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable controlling [`EventServiceConfig::continue_on_error`]
pub const ENV_CONTINUE_ON_ERROR: &str = "HERALD_CONTINUE_ON_ERROR";

/// Environment variable controlling [`EventServiceConfig::enable_logging`]
pub const ENV_ENABLE_LOGGING: &str = "HERALD_ENABLE_LOGGING";

/// Event service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventServiceConfig {
    /// Keep invoking handlers after one returns an error
    pub continue_on_error: bool,

    /// Emit tracing events for registrations and broadcasts
    pub enable_logging: bool,
}

impl Default for EventServiceConfig {
    fn default() -> Self {
        Self {
            continue_on_error: false,
            enable_logging: true,
        }
    }
}

impl EventServiceConfig {
    /// Read configuration from `HERALD_*` environment variables.
    ///
    /// Unset or unrecognised values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            continue_on_error: env_flag(ENV_CONTINUE_ON_ERROR)
                .unwrap_or(defaults.continue_on_error),
            enable_logging: env_flag(ENV_ENABLE_LOGGING).unwrap_or(defaults.enable_logging),
        }
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content)
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|value| parse_flag(&value))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Event service builder
pub struct EventServiceBuilder {
    config: EventServiceConfig,
}

impl EventServiceBuilder {
    /// Create new event service builder
    pub fn new() -> Self {
        Self {
            config: EventServiceConfig::default(),
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: EventServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable/disable continue on error
    pub fn continue_on_error(mut self, enabled: bool) -> Self {
        self.config.continue_on_error = enabled;
        self
    }

    /// Enable/disable logging
    pub fn enable_logging(mut self, enabled: bool) -> Self {
        self.config.enable_logging = enabled;
        self
    }

    /// Build the event service
    pub fn build(self) -> EventService {
        EventService::with_config(self.config)
    }
}

impl Default for EventServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
