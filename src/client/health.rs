// src/client/health.rs
use crate::model::HealthResponse;
use reqwest::header::CACHE_CONTROL;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    /// The request never produced a response (refused, DNS, timeout).
    #[error("{0}")]
    Network(String),

    /// The endpoint answered outside the 2xx range.
    #[error("HTTP {0}")]
    Status(u16),

    /// The body was not a valid health payload.
    #[error("invalid health payload: {0}")]
    Parse(#[from] serde_json::Error),
}

pub struct HealthClient {
    client: Client,
    endpoint: Url,
}

impl HealthClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, endpoint }
    }

    /// One GET against the health endpoint. Caching is disabled per request;
    /// each call is independent.
    pub async fn fetch(&self) -> Result<HealthResponse, HealthError> {
        debug!("GET {}", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| HealthError::Network(e.to_string()))?;

        classify_status(response.status())?;

        let body = response
            .text()
            .await
            .map_err(|e| HealthError::Network(e.to_string()))?;

        let health = serde_json::from_str(&body)?;
        Ok(health)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn classify_status(status: StatusCode) -> Result<(), HealthError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(HealthError::Status(status.as_u16()))
    }
}
