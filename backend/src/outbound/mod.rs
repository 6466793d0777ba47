//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: immutable in-memory sock store
//! - **persistence**: PostgreSQL sock store using Diesel ORM
//! - **metrics**: Prometheus-backed metrics exporters (feature-gated)
//!
//! Adapters translate between domain types and infrastructure-specific
//! representations. They contain no business logic.

pub mod memory;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod persistence;
