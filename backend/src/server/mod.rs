//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::CatalogueSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use catalogue::Trace;
#[cfg(debug_assertions)]
use catalogue::doc::ApiDoc;
use catalogue::domain::ports::RequestMetrics;
#[cfg(not(feature = "metrics"))]
use catalogue::domain::ports::{NoOpRequestMetrics, NoOpServiceMetrics, ServiceMetrics};
use catalogue::inbound::http::configure;
use catalogue::inbound::http::state::HttpState;
use catalogue::middleware::RequestObserver;
#[cfg(feature = "metrics")]
use metrics::{MetricSinks, render_metrics};
#[cfg(feature = "metrics")]
use prometheus::Registry;
use state_builders::build_http_state;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    request_metrics: Arc<dyn RequestMetrics>,
    #[cfg(feature = "metrics")]
    registry: Option<web::Data<Registry>>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        request_metrics,
        #[cfg(feature = "metrics")]
        registry,
    } = deps;

    let app = App::new()
        .app_data(http_state)
        .wrap(RequestObserver::new(request_metrics))
        .wrap(Trace)
        .configure(configure);

    #[cfg(feature = "metrics")]
    let app = match registry {
        Some(registry) => app
            .app_data(registry)
            .route("/metrics", web::get().to(render_metrics)),
        None => app,
    };

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

#[cfg(feature = "metrics")]
fn build_dependencies(config: &ServerConfig) -> std::io::Result<AppDependencies> {
    let sinks = MetricSinks::from_registry(config.prometheus.as_ref())?;
    Ok(AppDependencies {
        http_state: web::Data::new(build_http_state(config, sinks.service)),
        request_metrics: sinks.requests,
        registry: config.prometheus.clone().map(web::Data::new),
    })
}

#[cfg(not(feature = "metrics"))]
fn build_dependencies(config: &ServerConfig) -> std::io::Result<AppDependencies> {
    let service_metrics: Arc<dyn ServiceMetrics> = Arc::new(NoOpServiceMetrics);
    Ok(AppDependencies {
        http_state: web::Data::new(build_http_state(config, service_metrics)),
        request_metrics: Arc::new(NoOpRequestMetrics),
    })
}

/// Construct an Actix HTTP server from the given configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when metric registration, binding the
/// socket or starting the server fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let deps = build_dependencies(&config)?;
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr())?
        .run();
    Ok(server)
}
