//! Prometheus adapter for HTTP request latency.
//!
//! # Metric Specification
//!
//! - **Name**: `http_request_duration_seconds`
//! - **Type**: Histogram (default buckets)
//! - **Labels**:
//!   - `method`: HTTP method
//!   - `path`: matched route template, empty when nothing matched
//!   - `status_code`: numeric response status

use std::time::Duration;

use async_trait::async_trait;
use prometheus::{HistogramOpts, HistogramVec, Registry};

use crate::domain::ports::{RequestLabels, RequestMetrics, RequestMetricsError};

/// Prometheus-backed request latency recorder.
pub struct PrometheusRequestMetrics {
    duration: HistogramVec,
}

impl PrometheusRequestMetrics {
    /// Create and register the histogram with the given registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same name is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Time (in seconds) spent serving HTTP requests.",
            ),
            &["method", "path", "status_code"],
        )?;
        registry.register(Box::new(duration.clone()))?;
        Ok(Self { duration })
    }
}

#[async_trait]
impl RequestMetrics for PrometheusRequestMetrics {
    async fn observe(
        &self,
        labels: &RequestLabels,
        elapsed: Duration,
    ) -> Result<(), RequestMetricsError> {
        let status = labels.status.to_string();
        self.duration
            .get_metric_with_label_values(&[
                labels.method.as_str(),
                labels.route.as_str(),
                status.as_str(),
            ])
            .map_err(|err| RequestMetricsError::export(err.to_string()))?
            .observe(elapsed.as_secs_f64());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(route: &str, status: u16) -> RequestLabels {
        RequestLabels {
            method: "GET".to_owned(),
            route: route.to_owned(),
            status,
        }
    }

    #[tokio::test]
    async fn observations_are_keyed_by_route_template_and_status() {
        let registry = Registry::new();
        let metrics =
            PrometheusRequestMetrics::new(&registry).expect("metric registration should succeed");

        for _ in 0..2 {
            metrics
                .observe(&labels("/catalogue/{id}", 200), Duration::from_millis(3))
                .await
                .expect("observation recorded");
        }
        metrics
            .observe(&labels("/catalogue/{id}", 404), Duration::from_millis(1))
            .await
            .expect("observation recorded");

        let ok = metrics
            .duration
            .with_label_values(&["GET", "/catalogue/{id}", "200"]);
        let missing = metrics
            .duration
            .with_label_values(&["GET", "/catalogue/{id}", "404"]);
        assert_eq!(ok.get_sample_count(), 2);
        assert_eq!(missing.get_sample_count(), 1);
    }

    #[test]
    fn second_registration_is_rejected() {
        let registry = Registry::new();
        PrometheusRequestMetrics::new(&registry).expect("first registration succeeds");
        assert!(PrometheusRequestMetrics::new(&registry).is_err());
    }
}
