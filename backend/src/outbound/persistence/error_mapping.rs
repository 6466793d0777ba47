//! Diesel and pool error mapping for the sock repository.
//!
//! Connectivity failures become `Connection` so the service can answer 503;
//! everything else is a `Query` failure. Driver text is logged at debug level
//! and kept in the port error message, which the service never forwards.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;
use crate::domain::ports::SockRepositoryError;

pub(crate) fn map_pool_error(error: PoolError) -> SockRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            SockRepositoryError::connection(message)
        }
    }
}

pub(crate) fn map_diesel_error(error: DieselError, operation: &'static str) -> SockRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        other => debug!(error = %other, operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            SockRepositoryError::connection(format!("{operation}: database connection lost"))
        }
        other => SockRepositoryError::query(format!("{operation}: {other}")),
    }
}
