//! Chat provider trait definition

use async_trait::async_trait;

use crate::{Message, Model, Response, Result};

/// Trait for chat-completion providers
///
/// The agent talks to its model exclusively through this trait; the single
/// shipped implementation is the OpenAI-compatible driver, and tests swap in
/// scripted providers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a conversation and wait for the complete response
    async fn send_message(&self, messages: Vec<Message>) -> Result<Response>;

    /// Send a conversation along with tool definitions
    ///
    /// Returns the raw JSON response, which may contain tool calls for the
    /// caller to parse and execute.
    async fn send_message_with_tools(
        &self,
        messages: Vec<Message>,
        tools: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value>;

    /// The allow-listed model this provider is bound to
    fn model(&self) -> Model;

    /// Get the provider name
    fn name(&self) -> &str;
}
