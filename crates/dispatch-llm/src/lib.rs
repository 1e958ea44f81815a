//! Chat Provider Abstraction
//!
//! A unified interface for the chat-completion backend the agent runs
//! against, plus the closed allow-list of models a run may select.
//!
//! # Example
//!
//! ```no_run
//! use dispatch_llm::{ChatProvider, Message, Model, OpenAIProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenAIProvider::new("your-api-key", Model::Gpt4o)?;
//!
//!     let messages = vec![Message::user("Hello, how are you?")];
//!     let response = provider.send_message(messages).await?;
//!     println!("Response: {}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod model;
pub mod provider;
pub mod types;

// Provider implementations
pub mod openai;

// Re-exports
pub use error::{ProviderError, Result};
pub use model::Model;
pub use openai::OpenAIProvider;
pub use provider::ChatProvider;
pub use types::{Message, MessageRole, Response, TokenUsage};

/// Create a provider for an allow-listed model
///
/// One backend ships today; an alternate provider would slot in here
/// without touching the command surface.
pub fn create_provider(
    api_key: &str,
    model: Model,
    timeout: std::time::Duration,
) -> Result<Box<dyn ChatProvider>> {
    Ok(Box::new(
        OpenAIProvider::new(api_key, model)?.with_timeout(timeout),
    ))
}
