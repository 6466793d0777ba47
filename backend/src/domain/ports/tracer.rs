//! Port supplying one span per endpoint invocation.

use tracing::{Span, info_span};

/// Source of endpoint spans.
pub trait Tracer: Send + Sync {
    /// Span covering one call of `operation`; entered for the whole call.
    fn span(&self, operation: &'static str) -> Span;
}

/// Tracer that never records anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn span(&self, _operation: &'static str) -> Span {
        Span::none()
    }
}

/// Tracer emitting `endpoint` spans through the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTracer;

impl Tracer for TracingTracer {
    fn span(&self, operation: &'static str) -> Span {
        info_span!("endpoint", operation)
    }
}
