//! Dispatch Core
//!
//! Environment bootstrap (managed vs local), runtime settings, logging setup
//! and the base error type for the dispatch workspace.

pub mod bootstrap;
pub mod error;
pub mod logging;
pub mod settings;

// Re-export commonly used types
pub use bootstrap::{Bootstrap, CloudEnv, ExecutionMode};
pub use error::{CoreError, Result};
pub use logging::init_logging;
pub use settings::{load_settings, load_settings_or_default, Settings};
