//! Agent implementation

use std::sync::Arc;
use std::time::Instant;

use dispatch_events::{EventBus, RunEvent};
use dispatch_llm::{ChatProvider, Message};
use dispatch_tools::ToolRegistry;

use crate::{error::AgentError, parser, Result};

/// Configuration for a single run
#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Identifier stamped on every emitted event
    pub run_id: String,

    /// System message for the agent
    pub system_message: Option<String>,

    /// Maximum iterations of the tool loop (prevents infinite loops)
    pub max_iterations: usize,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            run_id: "local".to_string(),
            system_message: Some("You are a helpful AI assistant.".to_string()),
            max_iterations: 10,
        }
    }
}

/// An agent bound to one model and one set of capabilities
///
/// Constructed once per process invocation and executed once; nothing
/// persists across runs.
pub struct Agent {
    provider: Arc<dyn ChatProvider>,
    tools: Arc<ToolRegistry>,
    events: EventBus,
    options: AgentOptions,
}

impl Agent {
    /// Create a new agent builder
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    /// Execute one run with the given prompt
    ///
    /// Sends the conversation to the provider, executes any tool calls the
    /// model requests, feeds results back, and returns the final assistant
    /// text. Provider and tool failures propagate unchanged.
    pub async fn run(&self, prompt: &str) -> Result<String> {
        let run_started = Instant::now();
        let run_id = self.options.run_id.clone();
        let model = self.provider.model();

        self.events
            .emit(RunEvent::run_started(&run_id, model.as_str()));
        tracing::info!("User: {}", prompt);

        let mut messages = Vec::new();
        if let Some(system) = &self.options.system_message {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(prompt));

        let mut iterations = 0;

        loop {
            iterations += 1;

            if iterations > self.options.max_iterations {
                tracing::error!("Max iterations ({}) exceeded", self.options.max_iterations);
                return Err(self.fail(AgentError::MaxIterationsExceeded(
                    self.options.max_iterations,
                )));
            }

            tracing::debug!("Iteration {}/{}", iterations, self.options.max_iterations);

            // Without tools there is nothing to loop over
            if self.tools.count() == 0 {
                self.events.emit(RunEvent::provider_request(
                    &run_id,
                    model.as_str(),
                    messages.len(),
                ));

                let request_started = Instant::now();
                let response = match self.provider.send_message(messages.clone()).await {
                    Ok(response) => response,
                    Err(e) => return Err(self.fail(e.into())),
                };

                self.events.emit(RunEvent::provider_response(
                    &run_id,
                    model.as_str(),
                    request_started.elapsed().as_millis() as u64,
                ));
                self.events.emit(RunEvent::run_completed(
                    &run_id,
                    run_started.elapsed().as_millis() as u64,
                ));

                tracing::info!("Assistant: {}", response.content);
                return Ok(response.content);
            }

            let definitions = self.tools.to_function_definitions();
            tracing::debug!("Sending {} tools to the provider", definitions.len());

            self.events.emit(RunEvent::provider_request(
                &run_id,
                model.as_str(),
                messages.len(),
            ));

            let request_started = Instant::now();
            let raw_response = match self
                .provider
                .send_message_with_tools(messages.clone(), definitions)
                .await
            {
                Ok(response) => response,
                Err(e) => return Err(self.fail(e.into())),
            };

            self.events.emit(RunEvent::provider_response(
                &run_id,
                model.as_str(),
                request_started.elapsed().as_millis() as u64,
            ));

            let tool_calls = match parser::parse_tool_calls(&raw_response) {
                Ok(calls) => calls,
                Err(e) => return Err(self.fail(e)),
            };

            if !tool_calls.is_empty() {
                tracing::info!("Model requested {} tool(s)", tool_calls.len());

                messages.push(Message::assistant(
                    "I'll use some tools to help answer that.",
                ));

                for tool_call in &tool_calls {
                    self.events.emit(RunEvent::tool_started(
                        &run_id,
                        &tool_call.name,
                        tool_call.parameters.clone(),
                    ));

                    let tool_started = Instant::now();
                    let result = match self
                        .tools
                        .execute(&tool_call.name, tool_call.parameters.clone())
                        .await
                    {
                        Ok(result) => result,
                        Err(e) => return Err(self.fail(e.into())),
                    };

                    self.events.emit(RunEvent::tool_completed(
                        &run_id,
                        &tool_call.name,
                        result.success,
                        tool_started.elapsed().as_millis() as u64,
                    ));

                    let result_text = if result.success {
                        format!(
                            "Tool '{}' returned: {}",
                            tool_call.name,
                            result
                                .data
                                .as_ref()
                                .map(|d| serde_json::to_string_pretty(d).unwrap_or_default())
                                .unwrap_or_default()
                        )
                    } else {
                        format!(
                            "Tool '{}' failed: {}",
                            tool_call.name,
                            result.error.as_deref().unwrap_or("Unknown error")
                        )
                    };

                    messages.push(Message::user(result_text));
                }

                // Loop continues so the model can see the tool results
                continue;
            }

            // No tool calls, the response is final
            let content = parser::extract_content(&raw_response);

            self.events.emit(RunEvent::run_completed(
                &run_id,
                run_started.elapsed().as_millis() as u64,
            ));

            tracing::info!("Assistant: {}", content);
            return Ok(content);
        }
    }

    /// Emit a failure event and hand the error back
    fn fail(&self, err: AgentError) -> AgentError {
        self.events
            .emit(RunEvent::run_failed(&self.options.run_id, err.to_string()));
        err
    }
}

/// Builder for constructing an [`Agent`]
pub struct AgentBuilder {
    provider: Option<Arc<dyn ChatProvider>>,
    tools: Option<Arc<ToolRegistry>>,
    events: Option<EventBus>,
    options: AgentOptions,
}

impl AgentBuilder {
    /// Create a new agent builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: None,
            events: None,
            options: AgentOptions::default(),
        }
    }

    /// Set the chat provider
    pub fn provider<P: ChatProvider + 'static>(mut self, provider: P) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Set the chat provider from a boxed trait object
    pub fn boxed_provider(mut self, provider: Box<dyn ChatProvider>) -> Self {
        self.provider = Some(Arc::from(provider));
        self
    }

    /// Set the tool registry
    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = Some(Arc::new(tools));
        self
    }

    /// Set the event bus runs emit on
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Set the run identifier
    pub fn run_id<S: Into<String>>(mut self, id: S) -> Self {
        self.options.run_id = id.into();
        self
    }

    /// Set the system message
    pub fn system_message<S: Into<String>>(mut self, msg: S) -> Self {
        self.options.system_message = Some(msg.into());
        self
    }

    /// Set max iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.options.max_iterations = max;
        self
    }

    /// Build the agent
    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::config("chat provider not set"))?;

        let tools = self.tools.unwrap_or_else(|| Arc::new(ToolRegistry::new()));
        let events = self.events.unwrap_or_default();

        Ok(Agent {
            provider,
            tools,
            events,
            options: self.options,
        })
    }
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
