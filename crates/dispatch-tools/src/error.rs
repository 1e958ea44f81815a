//! Error types for tool operations

use dispatch_core::CoreError;

/// Result type for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors that can occur during tool operations
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Tool not found
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Tool execution failed
    #[error("Tool execution failed: {0}")]
    Execution(String),

    /// Invalid parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Tool already registered
    #[error("Tool already registered: {0}")]
    AlreadyRegistered(String),

    /// Generic error from dispatch-core
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ToolError {
    /// Create an execution error
    pub fn execution<S: Into<String>>(msg: S) -> Self {
        Self::Execution(msg.into())
    }

    /// Create an invalid parameters error
    pub fn invalid_params<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(tool_name: S) -> Self {
        Self::NotFound(tool_name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ToolError::not_found("date_time");
        assert!(matches!(err, ToolError::NotFound(_)));
        assert_eq!(err.to_string(), "Tool not found: date_time");
    }

    #[test]
    fn test_execution_error() {
        let err = ToolError::execution("clock unavailable");
        assert!(matches!(err, ToolError::Execution(_)));
    }
}
