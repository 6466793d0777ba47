//! Health endpoints.
//!
//! `/health` and `/healthz` answer 200 with the health snapshot whenever the
//! process is serving; unhealthy dependencies show up in the body, not in
//! the status code.

use actix_web::{HttpResponse, get, web};

use crate::endpoint::{HealthRequest, HealthResponse};
use crate::inbound::http::state::HttpState;

async fn health_snapshot(state: &HttpState) -> HttpResponse {
    let response: HealthResponse = state.endpoints.health(HealthRequest).await;
    HttpResponse::Ok().json(response)
}

/// Report service and store health.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Health snapshot", body = HealthResponse)),
    tags = ["health"],
    operation_id = "health"
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    health_snapshot(&state).await
}

/// Liveness alias of `/health`.
#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "Health snapshot", body = HealthResponse)),
    tags = ["health"],
    operation_id = "healthz"
)]
#[get("/healthz")]
pub async fn healthz(state: web::Data<HttpState>) -> HttpResponse {
    health_snapshot(&state).await
}
