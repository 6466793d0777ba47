//! Logging decorator for the catalogue service.
//!
//! [`LoggingMiddleware`] implements [`CatalogueService`] by delegating to an
//! inner service and emitting one structured event per call: the method, its
//! inputs (held on a `catalogue_call` span), a summary of the result, the
//! error message when there is one, and the elapsed time. Results and errors
//! are returned untouched.
//!
//! Exactly one event is emitted per invocation. If the inner call panics or
//! the future is dropped before completing, [`CallLog`]'s `Drop` emits a
//! warning instead and the panic keeps unwinding.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{Instrument as _, Span, info, info_span, warn};

use crate::domain::ports::CatalogueService;
use crate::domain::{Error, HealthCheck, ListQuery, Sock, TagFilter};

/// Service decorator logging every call.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use catalogue::domain::CatalogueServiceImpl;
/// use catalogue::domain::ports::CatalogueService;
/// use catalogue::middleware::LoggingMiddleware;
/// use catalogue::outbound::memory::InMemorySockRepository;
///
/// let inner: Arc<dyn CatalogueService> =
///     Arc::new(CatalogueServiceImpl::new(Arc::new(InMemorySockRepository::default())));
/// let service: Arc<dyn CatalogueService> = Arc::new(LoggingMiddleware::new(inner));
/// # let _ = service;
/// ```
pub struct LoggingMiddleware<S: ?Sized> {
    next: Arc<S>,
}

impl<S: ?Sized> LoggingMiddleware<S> {
    pub fn new(next: Arc<S>) -> Self {
        Self { next }
    }
}

/// Guard emitting the abandonment event when a call never reports back.
struct CallLog {
    method: &'static str,
    span: Span,
    begin: Instant,
    reported: bool,
}

impl CallLog {
    fn begin(method: &'static str, span: Span) -> Self {
        Self {
            method,
            span,
            begin: Instant::now(),
            reported: false,
        }
    }

    fn span(&self) -> Span {
        self.span.clone()
    }

    fn report(mut self, emit: impl FnOnce(&Span, Duration)) {
        self.reported = true;
        emit(&self.span, self.begin.elapsed());
    }
}

impl Drop for CallLog {
    fn drop(&mut self) {
        if self.reported {
            return;
        }
        warn!(
            parent: &self.span,
            method = self.method,
            took = ?self.begin.elapsed(),
            panicked = std::thread::panicking(),
            "catalogue call ended without a result"
        );
    }
}

fn error_text<T>(result: &Result<T, Error>) -> Option<&str> {
    result.as_ref().err().map(Error::message)
}

#[async_trait]
impl<S> CatalogueService for LoggingMiddleware<S>
where
    S: CatalogueService + ?Sized,
{
    async fn list(&self, query: &ListQuery) -> Result<Vec<Sock>, Error> {
        let call = CallLog::begin(
            "List",
            info_span!(
                "catalogue_call",
                tags = %query.tags,
                order = %query.order,
                page_num = query.page.page_num(),
                page_size = query.page.page_size(),
            ),
        );
        let result = self.next.list(query).instrument(call.span()).await;
        call.report(|span, took| {
            info!(
                parent: span,
                method = "List",
                result = result.as_ref().map_or(0, Vec::len),
                err = error_text(&result),
                took = ?took,
                "catalogue call completed"
            );
        });
        result
    }

    async fn count(&self, tags: &TagFilter) -> Result<usize, Error> {
        let call = CallLog::begin("Count", info_span!("catalogue_call", tags = %tags));
        let result = self.next.count(tags).instrument(call.span()).await;
        call.report(|span, took| {
            info!(
                parent: span,
                method = "Count",
                result = result.as_ref().map_or(0, |count| *count),
                err = error_text(&result),
                took = ?took,
                "catalogue call completed"
            );
        });
        result
    }

    async fn get(&self, id: &str) -> Result<Sock, Error> {
        let call = CallLog::begin("Get", info_span!("catalogue_call", id));
        let result = self.next.get(id).instrument(call.span()).await;
        call.report(|span, took| {
            info!(
                parent: span,
                method = "Get",
                sock = result.as_ref().map_or("", |sock| sock.id.as_str()),
                err = error_text(&result),
                took = ?took,
                "catalogue call completed"
            );
        });
        result
    }

    async fn tags(&self) -> Result<Vec<String>, Error> {
        let call = CallLog::begin("Tags", info_span!("catalogue_call"));
        let result = self.next.tags().instrument(call.span()).await;
        call.report(|span, took| {
            info!(
                parent: span,
                method = "Tags",
                result = result.as_ref().map_or(0, Vec::len),
                err = error_text(&result),
                took = ?took,
                "catalogue call completed"
            );
        });
        result
    }

    async fn health(&self) -> Vec<HealthCheck> {
        let call = CallLog::begin("Health", info_span!("catalogue_call"));
        let health = self.next.health().instrument(call.span()).await;
        call.report(|span, took| {
            info!(
                parent: span,
                method = "Health",
                result = health.len(),
                took = ?took,
                "catalogue call completed"
            );
        });
        health
    }
}
