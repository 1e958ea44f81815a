//! Event listener trait and the bus-to-listener forwarder

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::{EventBus, Result, RunEvent};

/// A destination for run events
#[async_trait]
pub trait EventListener: Send + Sync {
    /// Handle a single event
    async fn on_event(&self, event: &RunEvent) -> Result<()>;
}

/// Drain a bus subscription into a listener
///
/// Runs until the bus closes (every bus clone dropped). Delivery failures
/// are logged and never abort the drain: telemetry must not take the run
/// down with it.
pub fn forward_events(bus: &EventBus, listener: Arc<dyn EventListener>) -> JoinHandle<()> {
    let mut receiver = bus.subscribe();

    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = listener.on_event(&event).await {
                        tracing::warn!(run_id = %event.run_id(), "event delivery failed: {e}");
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "event forwarder lagged; events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
