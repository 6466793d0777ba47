//! Service decorators and request middleware.
//!
//! Purpose: wrap the catalogue service with logging and metrics decorators
//! that share its trait, and wrap the HTTP pipeline with request tracing and
//! latency observation.

pub mod instrumenting;
pub mod logging;
pub mod request_observer;
pub mod trace;

pub use instrumenting::InstrumentingMiddleware;
pub use logging::LoggingMiddleware;
pub use request_observer::RequestObserver;
pub use trace::Trace;
