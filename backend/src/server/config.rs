//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use catalogue::domain::DEFAULT_HEALTH_TIMEOUT;
use catalogue::inbound::http::images::ImageDir;
use catalogue::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use prometheus::Registry;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) health_timeout: Duration,
    pub(crate) images: Option<ImageDir>,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<Registry>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            images: None,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// Without one the server answers from the seeded in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_images(mut self, images: ImageDir) -> Self {
        self.images = Some(images);
        self
    }

    #[must_use]
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach the Prometheus registry backing `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, registry: Option<Registry>) -> Self {
        self.prometheus = registry;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
