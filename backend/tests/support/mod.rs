//! Shared helper utilities for catalogue integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the service stack wiring and embedded PostgreSQL helpers they share live
//! here.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::provision_template_database;

use std::sync::Arc;

use catalogue::domain::CatalogueServiceImpl;
use catalogue::domain::Sock;
use catalogue::domain::ports::{CatalogueService, NoOpServiceMetrics, TracingTracer};
use catalogue::endpoint::Endpoints;
use catalogue::inbound::http::state::HttpState;
use catalogue::middleware::{InstrumentingMiddleware, LoggingMiddleware};
use catalogue::outbound::memory::InMemorySockRepository;

/// Domain service over `socks`, decorated the way the server wires it.
pub fn decorated_service(socks: Vec<Sock>) -> Arc<dyn CatalogueService> {
    let repository = Arc::new(InMemorySockRepository::new(socks));
    let service = Arc::new(CatalogueServiceImpl::new(repository));
    let instrumented = Arc::new(InstrumentingMiddleware::new(
        service,
        Arc::new(NoOpServiceMetrics),
    ));
    Arc::new(LoggingMiddleware::new(instrumented))
}

pub fn endpoints_over(socks: Vec<Sock>) -> Endpoints {
    Endpoints::with_tracer(decorated_service(socks), Arc::new(TracingTracer))
}

pub fn http_state_over(socks: Vec<Sock>) -> HttpState {
    HttpState::new(endpoints_over(socks))
}

/// Initialise the full HTTP pipeline (trace ids, request observation and
/// every catalogue route) over the given HTTP state and request metrics.
#[macro_export]
macro_rules! catalogue_app {
    ($state:expr, $request_metrics:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .wrap(catalogue::middleware::RequestObserver::new($request_metrics))
                .wrap(catalogue::Trace)
                .configure(catalogue::inbound::http::configure),
        )
        .await
    };
}
