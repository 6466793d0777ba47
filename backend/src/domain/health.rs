//! Point-in-time health snapshot entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of one health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum HealthStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "unhealthy")]
    Unhealthy,
}

/// Health of one named dependency (or of the service itself).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    #[schema(example = "catalogue-db")]
    pub service: String,
    pub status: HealthStatus,
    /// When the check ran.
    pub time: DateTime<Utc>,
}

impl HealthCheck {
    pub fn new(service: impl Into<String>, status: HealthStatus, time: DateTime<Utc>) -> Self {
        Self {
            service: service.into(),
            status,
            time,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Ok
    }
}
