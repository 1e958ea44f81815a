//! Event bus

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::RunEvent;

const DEFAULT_CAPACITY: usize = 1000;

/// Broadcast bus for run events
///
/// Events are fanned out to all subscribers; with no subscribers they are
/// dropped. Cloning shares the underlying channel, and the channel closes
/// once every clone has been dropped.
#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<RunEvent>>,
}

impl EventBus {
    /// Create a new bus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Emit an event to all subscribers
    pub fn emit(&self, event: RunEvent) {
        tracing::trace!(run_id = %event.run_id(), "run event: {}",
            serde_json::to_string(&event).unwrap_or_default()
        );

        // Ignore the error when there are no receivers
        let _ = self.sender.send(event);
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
