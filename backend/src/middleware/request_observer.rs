//! Per-request latency observation and access logging.
//!
//! [`RequestObserver`] times every request except the health checks, records
//! one observation through [`RequestMetrics`] keyed by method, matched route
//! template and status, and writes one access log event. The level follows
//! the status: `error` from 500, `warn` from 400, `info` otherwise.

use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use actix_web::Error;
use actix_web::body::{BodySize, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, error, info, warn};

use crate::domain::ports::{RequestLabels, RequestMetrics};

/// Paths served without observation.
pub const UNOBSERVED_PATHS: [&str; 2] = ["/health", "/healthz"];

/// Middleware factory observing request latency and outcome.
#[derive(Clone)]
pub struct RequestObserver {
    metrics: Arc<dyn RequestMetrics>,
}

impl RequestObserver {
    pub fn new(metrics: Arc<dyn RequestMetrics>) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestObserver
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestObserverMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestObserverMiddleware {
            service,
            metrics: Arc::clone(&self.metrics),
        }))
    }
}

/// Service wrapper produced by [`RequestObserver`].
pub struct RequestObserverMiddleware<S> {
    service: S,
    metrics: Arc<dyn RequestMetrics>,
}

/// Request attributes captured before the request is handed on.
struct AccessLine {
    host: String,
    method: String,
    uri: String,
    version: String,
}

impl AccessLine {
    fn capture(req: &ServiceRequest) -> Self {
        Self {
            host: req
                .peer_addr()
                .map_or_else(|| "-".to_owned(), |addr| addr.ip().to_string()),
            method: req.method().to_string(),
            uri: req.uri().to_string(),
            version: format!("{:?}", req.version()),
        }
    }

    fn emit(&self, status: u16, size: u64, elapsed: Duration) {
        let latency_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let Self {
            host,
            method,
            uri,
            version,
        } = self;
        match status {
            500.. => error!(
                %host, %method, %uri, %version, status, size, latency_ms,
                "request served"
            ),
            400..=499 => warn!(
                %host, %method, %uri, %version, status, size, latency_ms,
                "request served"
            ),
            _ => info!(
                %host, %method, %uri, %version, status, size, latency_ms,
                "request served"
            ),
        }
    }
}

fn body_size<B: MessageBody>(res: &ServiceResponse<B>) -> u64 {
    match res.response().body().size() {
        BodySize::Sized(size) => size,
        BodySize::None | BodySize::Stream => 0,
    }
}

impl<S, B> Service<ServiceRequest> for RequestObserverMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if UNOBSERVED_PATHS.contains(&req.path()) {
            return Box::pin(self.service.call(req));
        }

        let line = AccessLine::capture(&req);
        let metrics = Arc::clone(&self.metrics);
        let begin = Instant::now();
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            let elapsed = begin.elapsed();
            let status = res.status().as_u16();
            let labels = RequestLabels {
                method: line.method.clone(),
                route: res.request().match_pattern().unwrap_or_default(),
                status,
            };
            if let Err(error) = metrics.observe(&labels, elapsed).await {
                debug!(%error, route = %labels.route, "failed to record request metrics");
            }
            line.emit(status, body_size(&res), elapsed);
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockRequestMetrics, NoOpRequestMetrics, RequestMetricsError};
    use crate::test_support::logs::CapturedLogs;
    use actix_web::{App, HttpResponse, test, web};
    use mockall::predicate::{always, eq};

    macro_rules! observed_app {
        ($metrics:expr) => {
            test::init_service(
                App::new()
                    .wrap(RequestObserver::new(Arc::new($metrics)))
                    .route(
                        "/catalogue/{id}",
                        web::get().to(|| async { HttpResponse::NotFound().body("missing") }),
                    )
                    .route("/tags", web::get().to(|| async { HttpResponse::Ok().body("[]") }))
                    .route(
                        "/broken",
                        web::get().to(|| async { HttpResponse::InternalServerError().finish() }),
                    )
                    .route("/healthz", web::get().to(|| async { HttpResponse::Ok().finish() })),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn records_route_template_and_status() {
        let mut metrics = MockRequestMetrics::new();
        metrics
            .expect_observe()
            .with(
                eq(RequestLabels {
                    method: "GET".to_owned(),
                    route: "/catalogue/{id}".to_owned(),
                    status: 404,
                }),
                always(),
            )
            .times(1)
            .returning(|_, _| Ok(()));
        let app = observed_app!(metrics);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/catalogue/99").to_request(),
        )
        .await;
        assert_eq!(res.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn health_checks_bypass_observation() {
        let mut metrics = MockRequestMetrics::new();
        metrics.expect_observe().times(0);
        let app = observed_app!(metrics);

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/healthz").to_request()).await;
        assert!(res.status().is_success());
    }

    #[actix_web::test]
    async fn unmatched_requests_use_an_empty_route() {
        let mut metrics = MockRequestMetrics::new();
        metrics
            .expect_observe()
            .withf(|labels, _| labels.route.is_empty() && labels.status == 404)
            .times(1)
            .returning(|_, _| Ok(()));
        let app = observed_app!(metrics);

        test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;
    }

    #[actix_web::test]
    async fn exporter_failures_leave_the_response_alone() {
        let mut metrics = MockRequestMetrics::new();
        metrics
            .expect_observe()
            .returning(|_, _| Err(RequestMetricsError::export("registry gone")));
        let app = observed_app!(metrics);

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/tags").to_request()).await;
        assert!(res.status().is_success());
        assert_eq!(test::read_body(res).await, "[]");
    }

    #[actix_web::test]
    async fn log_level_follows_status() {
        let logs = CapturedLogs::install();
        let app = observed_app!(NoOpRequestMetrics);

        for uri in ["/tags", "/catalogue/1", "/broken"] {
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        }

        let lines = logs.lines();
        assert_eq!(lines.len(), 3, "{lines:?}");
        assert!(lines[0].contains("\"level\":\"INFO\""));
        assert!(lines[0].contains("\"size\":2"));
        assert!(lines[1].contains("\"level\":\"WARN\""));
        assert!(lines[1].contains("\"uri\":\"/catalogue/1\""));
        assert!(lines[2].contains("\"level\":\"ERROR\""));
        assert!(lines[2].contains("\"version\":\"HTTP/1.1\""));
    }
}
