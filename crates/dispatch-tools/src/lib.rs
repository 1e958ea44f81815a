//! Tool Calling System
//!
//! The capability infrastructure an agent exposes to its model: the [`Tool`]
//! trait, a thread-safe registry, JSON-schema rendering for provider
//! function definitions, and the built-in date/time capability.

pub mod error;
pub mod registry;
pub mod schema;
pub mod tool;

// Built-in tools
pub mod builtin;

// Re-exports
pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use schema::ToolSchema;
pub use tool::{Tool, ToolResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.count(), 0);
    }
}
