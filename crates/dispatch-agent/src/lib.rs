//! Agent Loop
//!
//! Ties the provider, tool and event crates together into one
//! builder-constructed agent with a single-shot `run` operation.
//!
//! # Example
//!
//! ```no_run
//! use dispatch_agent::Agent;
//! use dispatch_llm::{Model, OpenAIProvider};
//! use dispatch_tools::{builtin::DateTimeTool, ToolRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenAIProvider::new("api-key", Model::Gpt4o)?;
//!     let tools = ToolRegistry::new();
//!     tools.register(DateTimeTool)?;
//!
//!     let agent = Agent::builder()
//!         .provider(provider)
//!         .tools(tools)
//!         .build()?;
//!
//!     let response = agent.run("What time is it?").await?;
//!     println!("{}", response);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod error;
pub mod parser;

// Re-exports
pub use agent::{Agent, AgentBuilder, AgentOptions};
pub use error::{AgentError, Result};
