//! Error types for provider operations

use dispatch_core::CoreError;

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors that can occur while talking to a chat provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error
    #[error("API error: {0}")]
    Api(String),

    /// Failed to parse API response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Retry after: {0:?}")]
    RateLimited(Option<u64>),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Generic error from dispatch-core
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ProviderError {
    /// Create an API error
    pub fn api<S: Into<String>>(msg: S) -> Self {
        Self::Api(msg.into())
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Check if the error is worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::RateLimited(_) | Self::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ProviderError::api("test error");
        assert!(matches!(err, ProviderError::Api(_)));
        assert_eq!(err.to_string(), "API error: test error");
    }

    #[test]
    fn test_is_retryable() {
        assert!(ProviderError::Timeout.is_retryable());
        assert!(ProviderError::RateLimited(None).is_retryable());
        assert!(!ProviderError::Config("test".to_string()).is_retryable());
    }
}
