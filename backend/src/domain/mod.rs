//! Domain primitives, ports and services.
//!
//! Purpose: define the catalogue's transport-agnostic types and use-cases.
//! Inbound adapters depend on [`ports::CatalogueService`]; outbound adapters
//! implement [`ports::SockRepository`] and the metrics ports.
//!
//! Public surface:
//! - Error / ErrorCode — domain error taxonomy.
//! - Sock / TagFilter — catalogue items and AND tag filters.
//! - ListQuery / SortOrder — validated list parameters.
//! - HealthCheck / HealthStatus — health snapshot entries.
//! - CatalogueServiceImpl — repository-backed catalogue service.

pub mod catalogue_query;
pub mod catalogue_service;
pub mod error;
pub mod health;
pub mod ports;
pub mod sock;
pub mod trace_id;

pub use self::catalogue_query::{ListQuery, SortOrder, UnknownSortOrder, invalid_page};
pub use self::catalogue_service::{
    CatalogueServiceImpl, DEFAULT_HEALTH_TIMEOUT, SERVICE_NAME, STORE_SERVICE_NAME,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::health::{HealthCheck, HealthStatus};
pub use self::sock::{Sock, TagFilter};
pub use self::trace_id::TraceId;

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
