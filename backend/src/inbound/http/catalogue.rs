//! Catalogue read endpoints.
//!
//! ```text
//! GET /catalogue?tags=blue,red&order=price&pageNum=1&pageSize=10
//! GET /catalogue/size?tags=blue
//! GET /catalogue/{id}
//! GET /tags
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::Error;
use crate::endpoint::{CountResponse, GetRequest, ListResponse, TagsRequest, TagsResponse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::query::{CatalogueParams, QueryPairs};
use crate::inbound::http::state::HttpState;

/// List socks matching every requested tag, one page at a time.
#[utoipa::path(
    get,
    path = "/catalogue",
    params(CatalogueParams),
    responses(
        (status = 200, description = "Page of socks", body = ListResponse),
        (status = 400, description = "Invalid query parameters", body = Error),
        (status = 503, description = "Sock store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "listSocks"
)]
#[get("/catalogue")]
pub async fn list_socks(
    state: web::Data<HttpState>,
    query: QueryPairs,
) -> ApiResult<web::Json<ListResponse>> {
    let request = CatalogueParams::from_pairs(query.into_inner()).into_list_request()?;
    let response = state.endpoints.list(request).await?;
    Ok(web::Json(response))
}

/// Count socks matching every requested tag.
#[utoipa::path(
    get,
    path = "/catalogue/size",
    params(CatalogueParams),
    responses(
        (status = 200, description = "Number of matching socks", body = CountResponse),
        (status = 503, description = "Sock store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "countSocks"
)]
#[get("/catalogue/size")]
pub async fn count_socks(
    state: web::Data<HttpState>,
    query: QueryPairs,
) -> ApiResult<web::Json<CountResponse>> {
    let request = CatalogueParams::from_pairs(query.into_inner()).into_count_request();
    let response = state.endpoints.count(request).await?;
    Ok(web::Json(response))
}

/// Fetch one sock by identifier.
#[utoipa::path(
    get,
    path = "/catalogue/{id}",
    params(("id" = String, Path, description = "Sock identifier")),
    responses(
        (status = 200, description = "The sock", body = crate::domain::Sock),
        (status = 404, description = "No sock with that identifier", body = Error),
        (status = 503, description = "Sock store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "getSock"
)]
#[get("/catalogue/{id}")]
pub async fn get_sock(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let request = GetRequest { id: id.into_inner() };
    let response = state.endpoints.get(request).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// List every distinct tag.
#[utoipa::path(
    get,
    path = "/tags",
    responses(
        (status = 200, description = "Distinct tags", body = TagsResponse),
        (status = 503, description = "Sock store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<web::Json<TagsResponse>> {
    let response = state.endpoints.tags(TagsRequest).await?;
    Ok(web::Json(response))
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
