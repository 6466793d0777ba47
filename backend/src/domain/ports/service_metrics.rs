//! Domain port for recording per-method catalogue call metrics.
//!
//! The instrumenting decorator reports through this port so the domain never
//! depends on a metrics backend. Implementations may export to Prometheus or
//! discard observations in tests.

use std::time::Duration;

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording service metrics.
    pub enum ServiceMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "service metrics exporter failed: {message}",
    }
}

/// Whether a call returned `Ok` or `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Success,
    Failure,
}

impl CallOutcome {
    pub fn from_result<T, E>(result: &Result<T, E>) -> Self {
        if result.is_ok() {
            Self::Success
        } else {
            Self::Failure
        }
    }

    /// Label value used by exporters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "error",
        }
    }
}

/// Metrics recording port for catalogue service calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceMetrics: Send + Sync {
    /// Record one completed call of `method`.
    async fn record_call(
        &self,
        method: &'static str,
        outcome: CallOutcome,
        elapsed: Duration,
    ) -> Result<(), ServiceMetricsError>;
}

/// No-op implementation for when metrics are disabled or in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpServiceMetrics;

#[async_trait]
impl ServiceMetrics for NoOpServiceMetrics {
    async fn record_call(
        &self,
        _method: &'static str,
        _outcome: CallOutcome,
        _elapsed: Duration,
    ) -> Result<(), ServiceMetricsError> {
        Ok(())
    }
}
