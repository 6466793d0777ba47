//! Driving port for catalogue reads.
//!
//! Every inbound path and every service decorator depends on this trait
//! only, never on [`crate::domain::CatalogueServiceImpl`], so decorators can
//! be stacked in any order around the real implementation.

use async_trait::async_trait;

use crate::domain::{Error, HealthCheck, ListQuery, Sock, TagFilter};

/// Catalogue use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueService: Send + Sync {
    /// Page of socks matching all tags in the query, sorted by its order.
    ///
    /// A page past the end of the results is empty rather than an error.
    async fn list(&self, query: &ListQuery) -> Result<Vec<Sock>, Error>;

    /// Number of socks matching all `tags`, ignoring paging.
    async fn count(&self, tags: &TagFilter) -> Result<usize, Error>;

    /// Fetch one sock.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] for unknown ids.
    async fn get(&self, id: &str) -> Result<Sock, Error>;

    /// Distinct tags across the catalogue, in no particular order.
    async fn tags(&self) -> Result<Vec<String>, Error>;

    /// Best-effort health snapshot. Ping failures are reported as
    /// [`crate::domain::HealthStatus::Unhealthy`] entries, never as errors.
    async fn health(&self) -> Vec<HealthCheck>;
}
