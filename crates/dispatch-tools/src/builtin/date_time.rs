//! Date/time tool

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use crate::{Result, Tool, ToolResult, ToolSchema};

/// Tool that returns the current date and time
pub struct DateTimeTool;

#[async_trait]
impl Tool for DateTimeTool {
    fn name(&self) -> &str {
        "date_time"
    }

    fn description(&self) -> &str {
        "Get the current date and time in ISO 8601 format"
    }

    fn parameters_schema(&self) -> ToolSchema {
        // No parameters needed
        ToolSchema::new().with_description("No parameters required")
    }

    async fn execute(&self, _params: Value) -> Result<ToolResult> {
        let now = Utc::now();

        Ok(ToolResult::success(serde_json::json!({
            "timestamp": now.to_rfc3339(),
            "unix": now.timestamp(),
            "formatted": now.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        })))
    }
}
