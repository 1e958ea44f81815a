//! Basic Run Example
//!
//! Demonstrates wiring a provider, the date/time tool and an event bus into
//! an agent and running it once.
//!
//! Run with:
//! ```bash
//! OPENAI_API_KEY=your-key cargo run -p dispatch-agent --example basic_run
//! ```

use dispatch_agent::Agent;
use dispatch_events::{EventBus, RunEvent};
use dispatch_llm::{Model, OpenAIProvider};
use dispatch_tools::{builtin::DateTimeTool, ToolRegistry};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");
    let provider = OpenAIProvider::new(api_key, Model::Gpt4oMini)?;

    let tools = ToolRegistry::new();
    tools.register(DateTimeTool)?;

    let bus = EventBus::default();
    let mut subscriber = bus.subscribe();

    let agent = Agent::builder()
        .provider(provider)
        .tools(tools)
        .events(bus)
        .run_id("example-run")
        .build()?;

    let response = agent.run("What time is it right now?").await?;
    println!("Assistant: {response}");

    // Show what a listener would have observed
    while let Ok(event) = subscriber.try_recv() {
        if let RunEvent::ToolCallCompleted {
            tool_name, success, ..
        } = event
        {
            println!("(tool {tool_name} ran, success = {success})");
        }
    }

    Ok(())
}
