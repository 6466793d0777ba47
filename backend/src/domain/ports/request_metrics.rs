//! Port for per-request HTTP latency observations.
//!
//! One sink instance is built at start-up and injected into the request
//! observer middleware; nothing registers itself globally.

use std::time::Duration;

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording request metrics.
    pub enum RequestMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "request metrics exporter failed: {message}",
    }
}

/// Labels identifying one request observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLabels {
    /// HTTP method, for example `GET`.
    pub method: String,
    /// Matched route template such as `/catalogue/{id}`; empty when no
    /// route matched.
    pub route: String,
    pub status: u16,
}

/// Sink for request latency observations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestMetrics: Send + Sync {
    /// Record the latency of one served request.
    async fn observe(
        &self,
        labels: &RequestLabels,
        elapsed: Duration,
    ) -> Result<(), RequestMetricsError>;
}

/// No-op implementation for when metrics are disabled or in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpRequestMetrics;

#[async_trait]
impl RequestMetrics for NoOpRequestMetrics {
    async fn observe(
        &self,
        _labels: &RequestLabels,
        _elapsed: Duration,
    ) -> Result<(), RequestMetricsError> {
        Ok(())
    }
}
