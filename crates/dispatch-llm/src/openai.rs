//! OpenAI-compatible chat-completions driver

use async_trait::async_trait;
use backoff::{future::retry, ExponentialBackoff};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    error::{ProviderError, Result},
    model::Model,
    provider::ChatProvider,
    types::{Message, MessageRole, Response, TokenUsage},
};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI chat-completions provider
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    model: Model,
    timeout: Duration,
}

impl OpenAIProvider {
    /// Create a new provider bound to an allow-listed model
    pub fn new(api_key: impl Into<String>, model: Model) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ProviderError::config("OpenAI API key cannot be empty"));
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            model,
            timeout: Duration::from_secs(60),
        })
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Convert our messages to the wire format
    fn format_messages(&self, messages: &[Message]) -> Vec<WireMessage> {
        messages
            .iter()
            .map(|msg| WireMessage {
                role: match msg.role {
                    MessageRole::System => "system".to_string(),
                    MessageRole::User => "user".to_string(),
                    MessageRole::Assistant => "assistant".to_string(),
                },
                content: msg.content.clone(),
            })
            .collect()
    }

    /// Make a retryable API request
    async fn make_request<T: for<'de> Deserialize<'de>>(
        &self,
        request_body: &ChatRequest,
    ) -> Result<T> {
        let operation = || async {
            let response = self
                .client
                .post(format!("{OPENAI_API_BASE}/chat/completions"))
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .timeout(self.timeout)
                .json(request_body)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        backoff::Error::Permanent(ProviderError::Timeout)
                    } else {
                        backoff::Error::Transient {
                            err: ProviderError::Http(e),
                            retry_after: None,
                        }
                    }
                })?;

            let status = response.status();

            // Rate limiting is transient; honor retry-after when present
            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs: Option<u64> = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());

                return Err(backoff::Error::Transient {
                    err: ProviderError::RateLimited(retry_after_secs),
                    retry_after: retry_after_secs.map(Duration::from_secs),
                });
            }

            // Server errors are retryable
            if status.is_server_error() {
                let error_text = response.text().await.unwrap_or_default();
                return Err(backoff::Error::Transient {
                    err: ProviderError::api(format!("Server error: {error_text}")),
                    retry_after: None,
                });
            }

            // Client errors are not
            if status.is_client_error() {
                let error_text = response.text().await.unwrap_or_default();
                return Err(backoff::Error::Permanent(ProviderError::api(format!(
                    "Client error ({status}): {error_text}"
                ))));
            }

            response
                .json::<T>()
                .await
                .map_err(|e| backoff::Error::Permanent(ProviderError::parse(e.to_string())))
        };

        let backoff_config = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        retry(backoff_config, operation).await
    }
}

#[async_trait]
impl ChatProvider for OpenAIProvider {
    async fn send_message(&self, messages: Vec<Message>) -> Result<Response> {
        let request = ChatRequest {
            model: self.model.openai_id().to_string(),
            messages: self.format_messages(&messages),
            temperature: None,
            max_tokens: None,
            tools: None,
            tool_choice: None,
        };

        let response: ChatResponse = self.make_request(&request).await?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| ProviderError::parse("No choices in response"))?;

        Ok(Response {
            content: choice.message.content.clone().unwrap_or_default(),
            model: response.model,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason.clone(),
        })
    }

    async fn send_message_with_tools(
        &self,
        messages: Vec<Message>,
        tools: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let request = ChatRequest {
            model: self.model.openai_id().to_string(),
            messages: self.format_messages(&messages),
            temperature: None,
            max_tokens: None,
            tools: Some(tools),
            tool_choice: Some("auto".to_string()),
        };

        self.make_request(&request).await
    }

    fn model(&self) -> Model {
        self.model
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    tool_calls: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = OpenAIProvider::new("test-key", Model::Gpt4o);
        assert!(provider.is_ok());

        let provider = provider.unwrap();
        assert_eq!(provider.model(), Model::Gpt4o);
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_empty_api_key() {
        let provider = OpenAIProvider::new("", Model::Gpt4o);
        assert!(provider.is_err());
    }

    #[test]
    fn test_message_formatting() {
        let provider = OpenAIProvider::new("test-key", Model::Gpt4o).unwrap();
        let messages = vec![Message::system("You are helpful"), Message::user("Hello")];

        let formatted = provider.format_messages(&messages);
        assert_eq!(formatted.len(), 2);
        assert_eq!(formatted[0].role, "system");
        assert_eq!(formatted[1].role, "user");
    }

    #[test]
    fn test_request_carries_wire_id() {
        let provider = OpenAIProvider::new("test-key", Model::Gpt35Turbo).unwrap();
        let request = ChatRequest {
            model: provider.model.openai_id().to_string(),
            messages: vec![],
            temperature: None,
            max_tokens: None,
            tools: None,
            tool_choice: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_with_timeout() {
        let provider = OpenAIProvider::new("test-key", Model::Gpt4o)
            .unwrap()
            .with_timeout(Duration::from_secs(30));
        assert_eq!(provider.timeout, Duration::from_secs(30));
    }
}
