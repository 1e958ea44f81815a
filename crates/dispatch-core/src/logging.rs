//! Logging setup
//!
//! Structured logging via `tracing`. Called once at startup; `RUST_LOG`
//! takes precedence over the configured level when set.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::settings::LoggingSettings;

/// Initialize the global tracing subscriber
pub fn init_logging(settings: &LoggingSettings) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    if settings.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty())
            .init();
    }

    tracing::debug!(level = %settings.level, "logging initialized");
}
