//! Error types for event delivery

/// Result type for event delivery
pub type Result<T> = std::result::Result<T, EventError>;

/// Errors that can occur while forwarding events
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The event sink rejected the delivery
    #[error("Event sink error: {0}")]
    Sink(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EventError {
    /// Create a sink error
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        Self::Sink(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_error() {
        let err = EventError::sink("410 gone");
        assert!(matches!(err, EventError::Sink(_)));
        assert_eq!(err.to_string(), "Event sink error: 410 gone");
    }
}
