//! Inbound adapters that translate external requests into endpoint calls
//! while keeping framework details at the edge.

pub mod http;
