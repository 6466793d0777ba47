//! Catalogue domain service.
//!
//! Implements the [`CatalogueService`] driving port on top of a
//! [`SockRepository`], classifying store failures into the domain error
//! taxonomy so adapters never see raw repository errors.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::time::timeout;
use tracing::{error, warn};

use crate::domain::ports::{CatalogueService, SockRepository, SockRepositoryError};
use crate::domain::{Error, HealthCheck, HealthStatus, ListQuery, Sock, TagFilter};

/// Name reported for the service's own health entry.
pub const SERVICE_NAME: &str = "catalogue";
/// Name reported for the store's health entry.
pub const STORE_SERVICE_NAME: &str = "catalogue-db";
/// Upper bound on the store ping performed by [`CatalogueService::health`].
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

/// Catalogue service backed by a sock repository.
pub struct CatalogueServiceImpl<R: ?Sized> {
    repository: Arc<R>,
    health_timeout: Duration,
}

impl<R: ?Sized> Clone for CatalogueServiceImpl<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            health_timeout: self.health_timeout,
        }
    }
}

impl<R: ?Sized> CatalogueServiceImpl<R> {
    /// Create a service over `repository` with the default health timeout.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }

    /// Bound the store ping used by health checks.
    pub fn with_health_timeout(mut self, health_timeout: Duration) -> Self {
        self.health_timeout = health_timeout;
        self
    }
}

impl<R> CatalogueServiceImpl<R>
where
    R: SockRepository + ?Sized,
{
    fn map_repository_error(error: SockRepositoryError) -> Error {
        match error {
            SockRepositoryError::Connection { message } => {
                error!(%message, "sock store unavailable");
                Error::service_unavailable("sock store unavailable")
            }
            SockRepositoryError::Query { message } => {
                error!(%message, "sock store query failed");
                Error::internal(format!("sock store query failed: {message}"))
            }
        }
    }

    async fn ping_store(&self) -> HealthStatus {
        match timeout(self.health_timeout, self.repository.ping()).await {
            Ok(Ok(())) => HealthStatus::Ok,
            Ok(Err(err)) => {
                warn!(error = %err, "sock store health ping failed");
                HealthStatus::Unhealthy
            }
            Err(_) => {
                warn!(
                    timeout_ms = u64::try_from(self.health_timeout.as_millis()).unwrap_or(u64::MAX),
                    "sock store health ping timed out"
                );
                HealthStatus::Unhealthy
            }
        }
    }
}

#[async_trait]
impl<R> CatalogueService for CatalogueServiceImpl<R>
where
    R: SockRepository + ?Sized,
{
    async fn list(&self, query: &ListQuery) -> Result<Vec<Sock>, Error> {
        self.repository
            .list(query)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn count(&self, tags: &TagFilter) -> Result<usize, Error> {
        self.repository
            .count(tags)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get(&self, id: &str) -> Result<Sock, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("sock not found").with_details(json!({ "id": id })))
    }

    async fn tags(&self) -> Result<Vec<String>, Error> {
        self.repository
            .distinct_tags()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn health(&self) -> Vec<HealthCheck> {
        let store = self.ping_store().await;
        let now = Utc::now();
        vec![
            HealthCheck::new(SERVICE_NAME, HealthStatus::Ok, now),
            HealthCheck::new(STORE_SERVICE_NAME, store, now),
        ]
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
