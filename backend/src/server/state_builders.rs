//! Builders for the catalogue service stack and HTTP state.
//!
//! The service is assembled innermost first: the repository-backed domain
//! service, then the instrumenting decorator, then the logging decorator.

use std::sync::Arc;
use std::time::Duration;

use catalogue::domain::CatalogueServiceImpl;
use catalogue::domain::ports::{CatalogueService, ServiceMetrics, SockRepository, TracingTracer};
use catalogue::endpoint::Endpoints;
use catalogue::inbound::http::state::HttpState;
use catalogue::middleware::{InstrumentingMiddleware, LoggingMiddleware};
use catalogue::outbound::memory::InMemorySockRepository;
use catalogue::outbound::persistence::{DbPool, DieselSockRepository};
use tracing::info;

use super::ServerConfig;

/// Diesel store when a pool is configured, otherwise the seeded in-memory
/// catalogue.
pub(crate) fn build_repository(pool: Option<&DbPool>) -> Arc<dyn SockRepository> {
    match pool {
        Some(pool) => Arc::new(DieselSockRepository::new(pool.clone())),
        None => {
            let repository = InMemorySockRepository::default();
            info!(socks = repository.len(), "no DSN configured, serving in-memory catalogue");
            Arc::new(repository)
        }
    }
}

pub(crate) fn build_catalogue_service(
    repository: Arc<dyn SockRepository>,
    health_timeout: Duration,
    metrics: Arc<dyn ServiceMetrics>,
) -> Arc<dyn CatalogueService> {
    let service = Arc::new(CatalogueServiceImpl::new(repository).with_health_timeout(health_timeout));
    let instrumented = Arc::new(InstrumentingMiddleware::new(service, metrics));
    Arc::new(LoggingMiddleware::new(instrumented))
}

pub(crate) fn build_http_state(
    config: &ServerConfig,
    metrics: Arc<dyn ServiceMetrics>,
) -> HttpState {
    let repository = build_repository(config.db_pool.as_ref());
    let service = build_catalogue_service(repository, config.health_timeout, metrics);
    let state = HttpState::new(Endpoints::with_tracer(service, Arc::new(TracingTracer)));
    match config.images.clone() {
        Some(images) => state.with_images(images),
        None => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    use catalogue::domain::ports::NoOpServiceMetrics;
    use catalogue::endpoint::{CountRequest, HealthRequest};

    #[tokio::test]
    async fn without_a_pool_the_seeded_catalogue_is_served() {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)));
        let state = build_http_state(&config, Arc::new(NoOpServiceMetrics));

        let count = state
            .endpoints
            .count(CountRequest { tags: Vec::new() })
            .await
            .expect("count succeeds");
        assert_eq!(count.size, InMemorySockRepository::default().len());
        assert!(state.images.is_none());

        let health = state.endpoints.health(HealthRequest).await;
        assert!(health.health.iter().all(|check| check.is_healthy()));
    }
}
