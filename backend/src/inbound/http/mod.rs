//! HTTP inbound adapter exposing the catalogue REST endpoints.

pub mod catalogue;
pub mod error;
pub mod health;
pub mod images;
pub mod query;
pub mod state;

pub use error::ApiResult;

use actix_web::web;

/// Register every catalogue route.
///
/// `/catalogue/size` is registered ahead of `/catalogue/{id}` so the literal
/// path wins.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use catalogue::domain::CatalogueServiceImpl;
/// use catalogue::endpoint::Endpoints;
/// use catalogue::inbound::http::{configure, state::HttpState};
/// use catalogue::outbound::memory::InMemorySockRepository;
///
/// let service = CatalogueServiceImpl::new(Arc::new(InMemorySockRepository::default()));
/// let state = HttpState::new(Endpoints::new(Arc::new(service)));
/// let _app = App::new()
///     .app_data(web::Data::new(state))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(catalogue::list_socks)
        .service(catalogue::count_socks)
        .service(images::get_image)
        .service(catalogue::get_sock)
        .service(catalogue::list_tags)
        .service(health::health)
        .service(health::healthz);
}
