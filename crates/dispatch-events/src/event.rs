//! Run event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events emitted over the lifetime of a single agent run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// Run lifecycle
    RunStarted {
        run_id: String,
        model: String,
        timestamp: DateTime<Utc>,
    },

    RunCompleted {
        run_id: String,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },

    RunFailed {
        run_id: String,
        error: String,
        timestamp: DateTime<Utc>,
    },

    /// Provider interaction
    ProviderRequestSent {
        run_id: String,
        model: String,
        message_count: usize,
        timestamp: DateTime<Utc>,
    },

    ProviderResponseReceived {
        run_id: String,
        model: String,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// Tool execution
    ToolCallStarted {
        run_id: String,
        tool_name: String,
        parameters: Value,
        timestamp: DateTime<Utc>,
    },

    ToolCallCompleted {
        run_id: String,
        tool_name: String,
        success: bool,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },
}

impl RunEvent {
    /// Get the run ID associated with this event
    pub fn run_id(&self) -> &str {
        match self {
            Self::RunStarted { run_id, .. } => run_id,
            Self::RunCompleted { run_id, .. } => run_id,
            Self::RunFailed { run_id, .. } => run_id,
            Self::ProviderRequestSent { run_id, .. } => run_id,
            Self::ProviderResponseReceived { run_id, .. } => run_id,
            Self::ToolCallStarted { run_id, .. } => run_id,
            Self::ToolCallCompleted { run_id, .. } => run_id,
        }
    }

    /// Get the timestamp of this event
    pub fn timestamp(&self) -> &DateTime<Utc> {
        match self {
            Self::RunStarted { timestamp, .. } => timestamp,
            Self::RunCompleted { timestamp, .. } => timestamp,
            Self::RunFailed { timestamp, .. } => timestamp,
            Self::ProviderRequestSent { timestamp, .. } => timestamp,
            Self::ProviderResponseReceived { timestamp, .. } => timestamp,
            Self::ToolCallStarted { timestamp, .. } => timestamp,
            Self::ToolCallCompleted { timestamp, .. } => timestamp,
        }
    }

    // Convenience constructors

    pub fn run_started(run_id: impl Into<String>, model: impl Into<String>) -> Self {
        Self::RunStarted {
            run_id: run_id.into(),
            model: model.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn run_completed(run_id: impl Into<String>, duration_ms: u64) -> Self {
        Self::RunCompleted {
            run_id: run_id.into(),
            duration_ms,
            timestamp: Utc::now(),
        }
    }

    pub fn run_failed(run_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self::RunFailed {
            run_id: run_id.into(),
            error: error.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn provider_request(
        run_id: impl Into<String>,
        model: impl Into<String>,
        message_count: usize,
    ) -> Self {
        Self::ProviderRequestSent {
            run_id: run_id.into(),
            model: model.into(),
            message_count,
            timestamp: Utc::now(),
        }
    }

    pub fn provider_response(
        run_id: impl Into<String>,
        model: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self::ProviderResponseReceived {
            run_id: run_id.into(),
            model: model.into(),
            duration_ms,
            timestamp: Utc::now(),
        }
    }

    pub fn tool_started(
        run_id: impl Into<String>,
        tool_name: impl Into<String>,
        params: Value,
    ) -> Self {
        Self::ToolCallStarted {
            run_id: run_id.into(),
            tool_name: tool_name.into(),
            parameters: params,
            timestamp: Utc::now(),
        }
    }

    pub fn tool_completed(
        run_id: impl Into<String>,
        tool_name: impl Into<String>,
        success: bool,
        duration_ms: u64,
    ) -> Self {
        Self::ToolCallCompleted {
            run_id: run_id.into(),
            tool_name: tool_name.into(),
            success,
            duration_ms,
            timestamp: Utc::now(),
        }
    }
}
