//! Prometheus sinks and the `/metrics` text endpoint.

use std::io;
use std::sync::Arc;

use actix_web::{HttpResponse, web};
use prometheus::{Encoder, Registry, TextEncoder};
use tracing::error;

use catalogue::domain::ports::{
    NoOpRequestMetrics, NoOpServiceMetrics, RequestMetrics, ServiceMetrics,
};
use catalogue::outbound::metrics::{PrometheusRequestMetrics, PrometheusServiceMetrics};

/// Metric sinks injected into the middleware stack.
#[derive(Clone)]
pub(crate) struct MetricSinks {
    pub(crate) requests: Arc<dyn RequestMetrics>,
    pub(crate) service: Arc<dyn ServiceMetrics>,
}

impl MetricSinks {
    /// Register Prometheus sinks when a registry is configured; no-op
    /// otherwise.
    ///
    /// # Errors
    /// Returns [`io::Error`] when metric registration fails.
    pub(crate) fn from_registry(registry: Option<&Registry>) -> io::Result<Self> {
        let Some(registry) = registry else {
            return Ok(Self {
                requests: Arc::new(NoOpRequestMetrics),
                service: Arc::new(NoOpServiceMetrics),
            });
        };
        let requests = PrometheusRequestMetrics::new(registry)
            .map_err(|e| io::Error::other(format!("request metrics registration failed: {e}")))?;
        let service = PrometheusServiceMetrics::new(registry)
            .map_err(|e| io::Error::other(format!("service metrics registration failed: {e}")))?;
        Ok(Self {
            requests: Arc::new(requests),
            service: Arc::new(service),
        })
    }
}

/// Render every registered metric in the Prometheus text format.
pub(crate) async fn render_metrics(registry: web::Data<Registry>) -> HttpResponse {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    match encoder.encode(&registry.gather(), &mut buffer) {
        Ok(()) => HttpResponse::Ok()
            .content_type(encoder.format_type())
            .body(buffer),
        Err(err) => {
            error!(error = %err, "failed to encode metrics");
            HttpResponse::InternalServerError().finish()
        }
    }
}
