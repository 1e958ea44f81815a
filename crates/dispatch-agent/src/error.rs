//! Error types for agent execution

use dispatch_llm::ProviderError;
use dispatch_tools::ToolError;

/// Result type for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors that can occur during an agent run
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Chat provider error
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Tool execution error
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// Max iterations exceeded
    #[error("Max iterations exceeded: {0}")]
    MaxIterationsExceeded(usize),

    /// Tool call parsing error
    #[error("Failed to parse tool call: {0}")]
    ToolCallParse(String),

    /// Agent not configured properly
    #[error("Agent configuration error: {0}")]
    Configuration(String),
}

impl AgentError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a tool call parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::ToolCallParse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = AgentError::config("missing provider");
        assert!(matches!(err, AgentError::Configuration(_)));
    }

    #[test]
    fn test_max_iterations() {
        let err = AgentError::MaxIterationsExceeded(10);
        assert!(err.to_string().contains("10"));
    }
}
