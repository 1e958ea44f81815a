//! Tool registry for managing and executing tools

use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

use crate::{error::ToolError, tool::Tool, Result, ToolResult};

/// Registry for the capabilities attached to an agent
///
/// Thread-safe and cheap to clone; the agent shares it across async tasks.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Arc<DashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self {
            tools: Arc::new(DashMap::new()),
        }
    }

    /// Register a tool
    ///
    /// Errors if a tool with the same name is already registered.
    pub fn register<T: Tool + 'static>(&self, tool: T) -> Result<()> {
        let name = tool.name().to_string();

        if self.tools.contains_key(&name) {
            return Err(ToolError::AlreadyRegistered(name));
        }

        self.tools.insert(name.clone(), Arc::new(tool));
        tracing::debug!("Registered tool: {}", name);
        Ok(())
    }

    /// Check if a tool is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, params: Value) -> Result<ToolResult> {
        let tool = self
            .get_tool(name)
            .ok_or_else(|| ToolError::not_found(name))?;

        tracing::debug!("Executing tool: {} with params: {}", name, params);

        match tool.execute(params).await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::error!("Tool {} execution failed: {}", name, e);
                Err(e)
            }
        }
    }

    /// List all registered tool names
    pub fn list_tools(&self) -> Vec<String> {
        self.tools.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Get the number of registered tools
    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// All tools rendered as provider function definitions
    pub fn to_function_definitions(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|entry| {
                let tool = entry.value();
                let schema = tool.parameters_schema();
                schema.to_function_definition(tool.name(), tool.description())
            })
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
