//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the endpoint layer and remain testable without I/O.

use std::sync::Arc;

use crate::endpoint::Endpoints;
use crate::inbound::http::images::ImageDir;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub endpoints: Endpoints,
    /// Image root; image requests answer 404 when unset.
    pub images: Option<Arc<ImageDir>>,
}

impl HttpState {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            images: None,
        }
    }

    #[must_use]
    pub fn with_images(mut self, images: ImageDir) -> Self {
        self.images = Some(Arc::new(images));
        self
    }
}
