//! Parser for tool calls in chat-completion responses

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::AgentError, Result};

/// A tool call extracted from a model response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub name: String,

    /// Parameters for the tool
    pub parameters: Value,

    /// Optional ID for tracking (from the provider)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(name: String, parameters: Value, id: Option<String>) -> Self {
        Self {
            name,
            parameters,
            id,
        }
    }
}

/// Extract tool calls from a raw chat-completion response
///
/// The provider returns tool calls in this shape:
/// ```json
/// {
///   "choices": [{
///     "message": {
///       "tool_calls": [{
///         "id": "call_abc",
///         "type": "function",
///         "function": {
///           "name": "date_time",
///           "arguments": "{}"
///         }
///       }]
///     }
///   }]
/// }
/// ```
///
/// A response without tool calls yields an empty vector.
pub fn parse_tool_calls(response: &Value) -> Result<Vec<ToolCall>> {
    let Some(tool_calls) = response
        .get("choices")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("message"))
        .and_then(|v| v.get("tool_calls"))
        .and_then(|v| v.as_array())
    else {
        return Ok(Vec::new());
    };

    let mut parsed_calls = Vec::new();

    for call in tool_calls {
        let id = call
            .get("id")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        let function = call
            .get("function")
            .ok_or_else(|| AgentError::parse("Missing function field"))?;

        let name = function
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AgentError::parse("Missing function name"))?
            .to_string();

        let arguments_str = function
            .get("arguments")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AgentError::parse("Missing function arguments"))?;

        let parameters: Value = serde_json::from_str(arguments_str)
            .map_err(|e| AgentError::parse(format!("Invalid JSON arguments: {e}")))?;

        parsed_calls.push(ToolCall {
            name,
            parameters,
            id,
        });
    }

    Ok(parsed_calls)
}

/// Extract the assistant's text from a raw chat-completion response
pub fn extract_content(response: &Value) -> String {
    response
        .get("choices")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("message"))
        .and_then(|v| v.get("content"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_tool_call() {
        let response = json!({
            "choices": [{
                "message": {
                    "tool_calls": [{
                        "id": "call_123",
                        "type": "function",
                        "function": {
                            "name": "date_time",
                            "arguments": "{}"
                        }
                    }]
                }
            }]
        });

        let calls = parse_tool_calls(&response).unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "date_time");
        assert_eq!(calls[0].id.as_ref().unwrap(), "call_123");
    }

    #[test]
    fn test_parse_multiple_tool_calls() {
        let response = json!({
            "choices": [{
                "message": {
                    "tool_calls": [
                        {
                            "id": "call_1",
                            "type": "function",
                            "function": {
                                "name": "date_time",
                                "arguments": "{}"
                            }
                        },
                        {
                            "id": "call_2",
                            "type": "function",
                            "function": {
                                "name": "date_time",
                                "arguments": "{\"timezone\": \"UTC\"}"
                            }
                        }
                    ]
                }
            }]
        });

        let calls = parse_tool_calls(&response).unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].parameters["timezone"], "UTC");
    }

    #[test]
    fn test_no_tool_calls_is_empty() {
        let response = json!({
            "choices": [{
                "message": {
                    "content": "Just a regular response"
                }
            }]
        });

        let calls = parse_tool_calls(&response).unwrap();
        assert!(calls.is_empty());
    }

    #[test]
    fn test_parse_invalid_arguments() {
        let response = json!({
            "choices": [{
                "message": {
                    "tool_calls": [{
                        "id": "call_123",
                        "type": "function",
                        "function": {
                            "name": "date_time",
                            "arguments": "invalid json {"
                        }
                    }]
                }
            }]
        });

        let result = parse_tool_calls(&response);
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_content() {
        let response = json!({
            "choices": [{
                "message": {
                    "content": "It is noon."
                }
            }]
        });

        assert_eq!(extract_content(&response), "It is noon.");
    }

    #[test]
    fn test_extract_content_missing() {
        let response = json!({"choices": []});
        assert_eq!(extract_content(&response), "");
    }
}
