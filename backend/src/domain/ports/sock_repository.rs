//! Driven port for reading socks and tags from the backing store.
//!
//! Adapters only translate storage rows into [`Sock`] values. Filtering,
//! ordering and paging are pushed down to the store so SQL adapters can use
//! `WHERE`/`ORDER BY`/`LIMIT` instead of loading the whole table.

use async_trait::async_trait;

use crate::domain::{ListQuery, Sock, TagFilter};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading from the sock store.
    pub enum SockRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "sock store connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "sock store query failed: {message}",
    }
}

/// Port for read access to the sock store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SockRepository: Send + Sync {
    /// Socks carrying every tag in `query.tags`, ordered by `query.order`
    /// (ties broken by id) and cut to `query.page`.
    async fn list(&self, query: &ListQuery) -> Result<Vec<Sock>, SockRepositoryError>;

    /// Number of socks carrying every tag in `tags`.
    async fn count(&self, tags: &TagFilter) -> Result<usize, SockRepositoryError>;

    /// Fetch one sock; `Ok(None)` when no sock has this id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Sock>, SockRepositoryError>;

    /// Distinct tag names across all socks.
    async fn distinct_tags(&self) -> Result<Vec<String>, SockRepositoryError>;

    /// Cheap reachability check used by health checks.
    async fn ping(&self) -> Result<(), SockRepositoryError>;
}
