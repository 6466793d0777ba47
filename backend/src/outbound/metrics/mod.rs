//! Outbound adapters for metrics exporting.
//!
//! Prometheus-backed implementations of the request and service metrics
//! ports. All adapters here are feature-gated behind the `metrics` feature.

mod prometheus_request_metrics;
mod prometheus_service_metrics;

pub use prometheus_request_metrics::PrometheusRequestMetrics;
pub use prometheus_service_metrics::PrometheusServiceMetrics;
