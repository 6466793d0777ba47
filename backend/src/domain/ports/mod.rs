//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue_service;
mod request_metrics;
mod service_metrics;
mod sock_repository;
mod tracer;

#[cfg(test)]
pub use catalogue_service::MockCatalogueService;
pub use catalogue_service::CatalogueService;
#[cfg(test)]
pub use request_metrics::MockRequestMetrics;
pub use request_metrics::{NoOpRequestMetrics, RequestLabels, RequestMetrics, RequestMetricsError};
#[cfg(test)]
pub use service_metrics::MockServiceMetrics;
pub use service_metrics::{CallOutcome, NoOpServiceMetrics, ServiceMetrics, ServiceMetricsError};
#[cfg(test)]
pub use sock_repository::MockSockRepository;
pub use sock_repository::{SockRepository, SockRepositoryError};
pub use tracer::{NoopTracer, Tracer, TracingTracer};
