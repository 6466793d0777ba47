//! Prometheus adapter for catalogue service call metrics.
//!
//! # Metric Specification
//!
//! - `catalogue_method_calls_total` (Counter): labels `method`, `outcome`
//!   (`success` or `error`)
//! - `catalogue_method_duration_seconds` (Histogram): labels `method`,
//!   `outcome`

use std::time::Duration;

use async_trait::async_trait;
use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry};

use crate::domain::ports::{CallOutcome, ServiceMetrics, ServiceMetricsError};

/// Prometheus-backed recorder for per-method service calls.
pub struct PrometheusServiceMetrics {
    calls_total: CounterVec,
    duration: HistogramVec,
}

impl PrometheusServiceMetrics {
    /// Create and register both metrics with the given registry.
    ///
    /// # Errors
    ///
    /// Returns an error if either metric is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let calls_total = CounterVec::new(
            Opts::new(
                "catalogue_method_calls_total",
                "Catalogue service calls by method and outcome.",
            ),
            &["method", "outcome"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new(
                "catalogue_method_duration_seconds",
                "Time (in seconds) spent in catalogue service methods.",
            ),
            &["method", "outcome"],
        )?;
        registry.register(Box::new(calls_total.clone()))?;
        registry.register(Box::new(duration.clone()))?;
        Ok(Self {
            calls_total,
            duration,
        })
    }
}

#[async_trait]
impl ServiceMetrics for PrometheusServiceMetrics {
    async fn record_call(
        &self,
        method: &'static str,
        outcome: CallOutcome,
        elapsed: Duration,
    ) -> Result<(), ServiceMetricsError> {
        let values = [method, outcome.as_str()];
        self.calls_total
            .get_metric_with_label_values(&values)
            .map_err(|err| ServiceMetricsError::export(err.to_string()))?
            .inc();
        self.duration
            .get_metric_with_label_values(&values)
            .map_err(|err| ServiceMetricsError::export(err.to_string()))?
            .observe(elapsed.as_secs_f64());
        Ok(())
    }
}
