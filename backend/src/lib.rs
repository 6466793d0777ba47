//! Sock catalogue service library.
//!
//! Layers, innermost first:
//! - [`domain`]: catalogue types, the service and its ports.
//! - [`middleware`]: service decorators (logging, instrumenting) and Actix
//!   middleware (trace ids, request observation).
//! - [`endpoint`]: request/response shapes wrapping each service method.
//! - [`inbound`]: the HTTP transport.
//! - [`outbound`]: sock stores and metrics exporters.

pub mod doc;
pub mod domain;
pub mod endpoint;
pub mod inbound;
pub mod middleware;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
