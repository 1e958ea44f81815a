//! Managed-platform event listener
//!
//! Ships run events to the hosting platform's event endpoint. Constructed
//! only in managed mode, from the cloud coordinates the bootstrap captured.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use dispatch_core::CloudEnv;

use crate::{
    error::{EventError, Result},
    listener::EventListener,
    RunEvent,
};

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Event listener that POSTs each event to the managed backend
pub struct CloudEventListener {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl CloudEventListener {
    /// Create a listener bound to one run's event endpoint
    pub fn new(cloud: &CloudEnv) -> Self {
        let endpoint = format!(
            "{}/api/structure-runs/{}/events",
            cloud.base_url.trim_end_matches('/'),
            cloud.run_id
        );

        Self {
            client: Client::new(),
            endpoint,
            api_key: cloud.api_key.clone(),
        }
    }

    /// The resolved event endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EventListener for CloudEventListener {
    async fn on_event(&self, event: &RunEvent) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(DELIVERY_TIMEOUT)
            .json(event)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EventError::sink(format!(
                "event sink returned {status}: {body}"
            )));
        }

        Ok(())
    }
}
