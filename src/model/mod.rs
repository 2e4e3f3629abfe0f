// src/model/mod.rs
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::HealthError;

/// Service name shown when the health payload omits one.
pub const DEFAULT_SERVICE: &str = "reckoning-machine";

/// Payload returned by the `/health` endpoint.
///
/// Both fields are optional on the wire; anything that is not a JSON object
/// is rejected at deserialization instead of being defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}

/// Visual state of the status pill. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillState {
    Unknown,    // nothing fetched yet, or a request in flight
    Ok,
    Bad,
}

impl PillState {
    pub fn label(&self) -> &'static str {
        match self {
            PillState::Unknown => "--",
            PillState::Ok => "OK",
            PillState::Bad => "Error",
        }
    }
}

/// Render-ready representation of the widget state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusViewModel {
    pub status: Option<String>,
    pub service: Option<String>,
    pub pill: PillState,
    pub error: Option<String>,
    pub checked_at: Option<DateTime<Utc>>,
}

impl StatusViewModel {
    /// State shown synchronously while a request is in flight.
    pub fn checking() -> Self {
        Self {
            status: Some("checking...".to_string()),
            service: None,
            pill: PillState::Unknown,
            error: None,
            checked_at: None,
        }
    }

    /// Successful check. Absent payload fields fall back to the values the
    /// endpoint normally reports.
    pub fn healthy(health: HealthResponse) -> Self {
        Self {
            status: Some(health.status.unwrap_or_else(|| "ok".to_string())),
            service: Some(health.service.unwrap_or_else(|| DEFAULT_SERVICE.to_string())),
            pill: PillState::Ok,
            error: None,
            checked_at: None,
        }
    }

    /// Failed check. All error kinds collapse into the same shape; only the
    /// message differs.
    pub fn failed(error: &HealthError) -> Self {
        Self {
            status: Some("error".to_string()),
            service: None,
            pill: PillState::Bad,
            error: Some(error.to_string()),
            checked_at: None,
        }
    }

    pub fn stamp(mut self, at: DateTime<Utc>) -> Self {
        self.checked_at = Some(at);
        self
    }

    pub fn status_text(&self) -> &str {
        self.status.as_deref().unwrap_or("unknown")
    }

    pub fn service_text(&self) -> &str {
        self.service.as_deref().unwrap_or("—")
    }
}
