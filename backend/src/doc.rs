//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every catalogue route from the HTTP inbound adapter
//! together with the domain and endpoint schemas they return. The document
//! backs Swagger UI in debug builds and is printed by the `openapi-dump`
//! binary for external tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, HealthCheck, HealthStatus, Sock};
use crate::endpoint::{CountResponse, HealthResponse, ListResponse, TagsResponse};

/// OpenAPI document for the catalogue API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalogue API",
        description = "Read-only sock catalogue: filtered listing, counts, lookups, tags and health."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::catalogue::list_socks,
        crate::inbound::http::catalogue::count_socks,
        crate::inbound::http::catalogue::get_sock,
        crate::inbound::http::catalogue::list_tags,
        crate::inbound::http::images::get_image,
        crate::inbound::http::health::health,
        crate::inbound::http::health::healthz,
    ),
    components(schemas(
        Sock,
        ListResponse,
        CountResponse,
        TagsResponse,
        HealthResponse,
        HealthCheck,
        HealthStatus,
        Error,
        ErrorCode
    )),
    tags(
        (name = "catalogue", description = "Catalogue lookups"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
