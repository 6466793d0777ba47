//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and the schema (`schema.rs`) stay
//! private to this module. Connections come from a `bb8` pool through
//! `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use catalogue::outbound::persistence::{DbPool, DieselSockRepository, PoolConfig};
//!
//! let pool = DbPool::new(&PoolConfig::new("postgres://localhost/socksdb"))?;
//! let repo = DieselSockRepository::new(pool);
//! # Ok::<(), catalogue::outbound::persistence::PoolError>(())
//! ```

mod diesel_sock_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_sock_repository::DieselSockRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
