//! Transport-agnostic endpoints over the catalogue service.
//!
//! Each service operation gets a request struct, a response struct and one
//! method on [`Endpoints`] that converts between them. Endpoints hold no
//! state beyond the shared service and tracer, perform no I/O of their own,
//! and run each call inside the span supplied by the [`Tracer`] port.

use std::sync::Arc;

use pagination::{DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use tracing::Instrument as _;
use utoipa::ToSchema;

use crate::domain::ports::{CatalogueService, NoopTracer, Tracer};
use crate::domain::{Error, HealthCheck, ListQuery, Sock, TagFilter};

/// Raw list parameters; validated into a [`ListQuery`] on invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub tags: Vec<String>,
    pub order: Option<String>,
    pub page_num: i64,
    pub page_size: i64,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            order: None,
            page_num: i64::from(DEFAULT_PAGE_NUM),
            page_size: i64::from(DEFAULT_PAGE_SIZE),
        }
    }
}

/// Page of socks, serialised as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ListResponse(pub Vec<Sock>);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountRequest {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    /// Number of socks matching every requested tag.
    #[schema(example = 2)]
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    pub id: String,
}

/// Single sock, serialised as the sock object itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct GetResponse(pub Sock);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagsRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TagsResponse {
    #[schema(example = json!(["blue", "red"]))]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub health: Vec<HealthCheck>,
}

/// Endpoint set bound to one service instance.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use catalogue::domain::CatalogueServiceImpl;
/// use catalogue::endpoint::{CountRequest, Endpoints};
/// use catalogue::outbound::memory::InMemorySockRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let service = CatalogueServiceImpl::new(Arc::new(InMemorySockRepository::default()));
/// let endpoints = Endpoints::new(Arc::new(service));
/// let counted = endpoints.count(CountRequest::default()).await.expect("count");
/// assert!(counted.size > 0);
/// # });
/// ```
#[derive(Clone)]
pub struct Endpoints {
    service: Arc<dyn CatalogueService>,
    tracer: Arc<dyn Tracer>,
}

impl Endpoints {
    /// Endpoints without tracing spans.
    pub fn new(service: Arc<dyn CatalogueService>) -> Self {
        Self::with_tracer(service, Arc::new(NoopTracer))
    }

    pub fn with_tracer(service: Arc<dyn CatalogueService>, tracer: Arc<dyn Tracer>) -> Self {
        Self { service, tracer }
    }

    pub async fn list(&self, request: ListRequest) -> Result<ListResponse, Error> {
        let span = self.tracer.span("list");
        async {
            let query = ListQuery::new(
                &request.tags,
                request.order.as_deref(),
                request.page_num,
                request.page_size,
            )?;
            self.service.list(&query).await.map(ListResponse)
        }
        .instrument(span)
        .await
    }

    pub async fn count(&self, request: CountRequest) -> Result<CountResponse, Error> {
        let tags = TagFilter::new(&request.tags);
        self.service
            .count(&tags)
            .instrument(self.tracer.span("count"))
            .await
            .map(|size| CountResponse { size })
    }

    pub async fn get(&self, request: GetRequest) -> Result<GetResponse, Error> {
        self.service
            .get(&request.id)
            .instrument(self.tracer.span("get"))
            .await
            .map(GetResponse)
    }

    pub async fn tags(&self, _request: TagsRequest) -> Result<TagsResponse, Error> {
        self.service
            .tags()
            .instrument(self.tracer.span("tags"))
            .await
            .map(|tags| TagsResponse { tags })
    }

    /// Health never fails; unhealthy dependencies are reported as data.
    pub async fn health(&self, _request: HealthRequest) -> HealthResponse {
        let health = self
            .service
            .health()
            .instrument(self.tracer.span("health"))
            .await;
        HealthResponse { health }
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
