//! Run Event Delivery
//!
//! Observability for agent runs: the [`RunEvent`] taxonomy, a broadcast
//! [`EventBus`], and listeners that consume the stream, most notably the
//! managed platform's HTTP event sink.
//!
//! # Example
//!
//! ```
//! use dispatch_events::{EventBus, RunEvent};
//!
//! let bus = EventBus::default();
//! let mut subscriber = bus.subscribe();
//!
//! bus.emit(RunEvent::run_started("run-1", "gpt-4o"));
//! ```

pub mod bus;
pub mod cloud;
pub mod error;
pub mod event;
pub mod listener;

// Re-exports
pub use bus::EventBus;
pub use cloud::CloudEventListener;
pub use error::{EventError, Result};
pub use event::RunEvent;
pub use listener::{forward_events, EventListener};
