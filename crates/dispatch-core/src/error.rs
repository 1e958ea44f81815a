//! Error types shared across the dispatch workspace

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Base error type for the dispatch runtime
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Process-environment errors (env vars, .env loading)
    #[error("Environment error: {0}")]
    Env(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Settings parsing errors
    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] config::ConfigError),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl CoreError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create an environment error
    pub fn env<S: Into<String>>(msg: S) -> Self {
        Self::Env(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
