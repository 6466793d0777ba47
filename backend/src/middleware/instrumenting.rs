//! Metrics decorator for the catalogue service.
//!
//! Same shape as [`super::LoggingMiddleware`]: delegate unchanged, then
//! report the method, outcome and latency through [`ServiceMetrics`].
//! Exporter failures are logged and never reach the caller.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{CallOutcome, CatalogueService, ServiceMetrics};
use crate::domain::{Error, HealthCheck, ListQuery, Sock, TagFilter};

/// Service decorator recording per-method call metrics.
pub struct InstrumentingMiddleware<S: ?Sized> {
    next: Arc<S>,
    metrics: Arc<dyn ServiceMetrics>,
}

impl<S: ?Sized> InstrumentingMiddleware<S> {
    pub fn new(next: Arc<S>, metrics: Arc<dyn ServiceMetrics>) -> Self {
        Self { next, metrics }
    }

    async fn record(&self, method: &'static str, outcome: CallOutcome, begin: Instant) {
        if let Err(error) = self
            .metrics
            .record_call(method, outcome, begin.elapsed())
            .await
        {
            debug!(%error, method, "failed to record service metrics");
        }
    }
}

#[async_trait]
impl<S> CatalogueService for InstrumentingMiddleware<S>
where
    S: CatalogueService + ?Sized,
{
    async fn list(&self, query: &ListQuery) -> Result<Vec<Sock>, Error> {
        let begin = Instant::now();
        let result = self.next.list(query).await;
        self.record("list", CallOutcome::from_result(&result), begin)
            .await;
        result
    }

    async fn count(&self, tags: &TagFilter) -> Result<usize, Error> {
        let begin = Instant::now();
        let result = self.next.count(tags).await;
        self.record("count", CallOutcome::from_result(&result), begin)
            .await;
        result
    }

    async fn get(&self, id: &str) -> Result<Sock, Error> {
        let begin = Instant::now();
        let result = self.next.get(id).await;
        self.record("get", CallOutcome::from_result(&result), begin)
            .await;
        result
    }

    async fn tags(&self) -> Result<Vec<String>, Error> {
        let begin = Instant::now();
        let result = self.next.tags().await;
        self.record("tags", CallOutcome::from_result(&result), begin)
            .await;
        result
    }

    async fn health(&self) -> Vec<HealthCheck> {
        let begin = Instant::now();
        let health = self.next.health().await;
        self.record("health", CallOutcome::Success, begin).await;
        health
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockCatalogueService, MockServiceMetrics, ServiceMetricsError};
    use mockall::predicate::{always, eq};

    #[tokio::test]
    async fn records_failure_outcome_and_passes_error_through() {
        let mut inner = MockCatalogueService::new();
        inner
            .expect_get()
            .times(1)
            .return_once(|_| Err(Error::not_found("sock not found")));
        let mut metrics = MockServiceMetrics::new();
        metrics
            .expect_record_call()
            .with(eq("get"), eq(CallOutcome::Failure), always())
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let service = InstrumentingMiddleware::new(Arc::new(inner), Arc::new(metrics));
        let err = service.get("1").await.expect_err("inner fails");
        assert_eq!(err, Error::not_found("sock not found"));
    }

    #[tokio::test]
    async fn exporter_failures_do_not_change_results() {
        let mut inner = MockCatalogueService::new();
        inner.expect_tags().return_once(|| Ok(vec!["blue".to_owned()]));
        let mut metrics = MockServiceMetrics::new();
        metrics
            .expect_record_call()
            .with(eq("tags"), eq(CallOutcome::Success), always())
            .return_once(|_, _, _| Err(ServiceMetricsError::export("registry gone")));

        let service = InstrumentingMiddleware::new(Arc::new(inner), Arc::new(metrics));
        assert_eq!(service.tags().await, Ok(vec!["blue".to_owned()]));
    }
}
