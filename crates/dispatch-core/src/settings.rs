//! Runtime settings
//!
//! Settings layer independently of the execution mode: defaults, then an
//! optional `dispatch.toml`, then `DISPATCH__`-prefixed environment
//! variables (e.g. `DISPATCH__RUN__MAX_ITERATIONS=5`).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, Result};

/// Default settings file looked up next to the binary's working directory
pub const SETTINGS_FILE: &str = "dispatch.toml";

/// Top-level runtime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Run behavior
    #[serde(default)]
    pub run: RunSettings,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON format
    #[serde(default)]
    pub json: bool,
}

/// Behavior of a single agent run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSettings {
    /// Name reported in telemetry
    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    /// System message handed to the agent
    #[serde(default = "default_system_message")]
    pub system_message: String,

    /// Maximum iterations of the tool loop
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Provider request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_agent_name() -> String {
    "dispatch".to_string()
}

fn default_system_message() -> String {
    "You are a helpful AI assistant.".to_string()
}

fn default_max_iterations() -> usize {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            agent_name: default_agent_name(),
            system_message: default_system_message(),
            max_iterations: default_max_iterations(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingSettings::default(),
            run: RunSettings::default(),
        }
    }
}

/// Load settings from a file, with environment overrides applied on top
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CoreError::config(format!(
            "Settings file not found: {}",
            path.display()
        )));
    }

    let loaded = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("DISPATCH").separator("__"))
        .build()?;

    let settings: Settings = loaded.try_deserialize()?;

    tracing::debug!(path = %path.display(), "settings loaded");

    Ok(settings)
}

/// Load settings, falling back to defaults when the file is absent
pub fn load_settings_or_default<P: AsRef<Path>>(path: P) -> Settings {
    match load_settings(path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::debug!("using default settings: {e}");
            Settings::default()
        }
    }
}
