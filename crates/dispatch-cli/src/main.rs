//! Dispatch CLI
//!
//! Bootstraps the execution environment (managed vs local), wires the
//! provider, the date/time tool and the event bus into one agent, and runs
//! it once with the prompt from the command line.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use dispatch_agent::Agent;
use dispatch_core::{init_logging, load_settings_or_default, settings::SETTINGS_FILE, Bootstrap};
use dispatch_events::{forward_events, CloudEventListener, EventBus};
use dispatch_llm::{create_provider, Model};
use dispatch_tools::{builtin::DateTimeTool, ToolRegistry};

/// Run a prompt through an agent with date/time access
#[derive(Debug, Parser)]
#[command(name = "dispatch", version, about)]
struct Cli {
    /// Prompt words, joined with spaces
    #[arg(required = true)]
    prompt: Vec<String>,

    /// Model to run against
    #[arg(long, short = 'm', alias = "m", default_value_t = Model::default())]
    model: Model,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let prompt = cli.prompt.join(" ");

    // Resolve the environment before anything else reads configuration
    let bootstrap = Bootstrap::resolve().context("failed to resolve execution environment")?;

    let settings = load_settings_or_default(SETTINGS_FILE);
    init_logging(&settings.logging);

    tracing::debug!(
        agent = %settings.run.agent_name,
        mode = ?bootstrap.mode(),
        run_id = %bootstrap.run_id(),
        model = %cli.model,
        "environment resolved"
    );

    let events = EventBus::default();

    // In managed mode, ship run telemetry to the platform's event sink
    let forwarder = bootstrap.cloud().map(|cloud| {
        let listener = Arc::new(CloudEventListener::new(cloud));
        tracing::debug!(endpoint = %listener.endpoint(), "cloud event listener registered");
        forward_events(&events, listener)
    });

    let provider = create_provider(
        bootstrap.provider_api_key()?,
        cli.model,
        Duration::from_secs(settings.run.request_timeout_secs),
    )?;

    let tools = ToolRegistry::new();
    tools.register(DateTimeTool)?;

    let agent = Agent::builder()
        .boxed_provider(provider)
        .tools(tools)
        .events(events.clone())
        .run_id(bootstrap.run_id())
        .system_message(settings.run.system_message.clone())
        .max_iterations(settings.run.max_iterations)
        .build()?;

    let outcome = agent.run(&prompt).await;

    // Close the bus so the forwarder can drain and finish
    drop(agent);
    drop(events);
    if let Some(handle) = forwarder {
        let _ = handle.await;
    }

    let output = outcome?;
    println!("{output}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_gpt_4o() {
        let cli = Cli::try_parse_from(["dispatch", "Hello"]).unwrap();
        assert_eq!(cli.model, Model::Gpt4o);
        assert_eq!(cli.prompt, vec!["Hello"]);
    }

    #[test]
    fn test_model_flag() {
        let cli = Cli::try_parse_from(["dispatch", "Hello", "--model", "gpt-3.5-turbo"]).unwrap();
        assert_eq!(cli.model, Model::Gpt35Turbo);
    }

    #[test]
    fn test_model_short_flag() {
        let cli = Cli::try_parse_from(["dispatch", "-m", "gpt-4o-mini", "Hello"]).unwrap();
        assert_eq!(cli.model, Model::Gpt4oMini);
    }

    #[test]
    fn test_model_legacy_alias() {
        let cli = Cli::try_parse_from(["dispatch", "--m", "gpt-4o-mini", "Hello"]).unwrap();
        assert_eq!(cli.model, Model::Gpt4oMini);
    }

    #[test]
    fn test_invalid_model_rejected() {
        let result = Cli::try_parse_from(["dispatch", "Hello", "--model", "gpt-5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_prompt_required() {
        let result = Cli::try_parse_from(["dispatch"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_prompt_words_join() {
        let cli = Cli::try_parse_from(["dispatch", "What", "time", "is", "it?"]).unwrap();
        assert_eq!(cli.prompt.join(" "), "What time is it?");
        assert_eq!(cli.model, Model::Gpt4o);
    }
}
