//! Mapping from pool and Diesel failures to [`UserPersistenceError`].
//!
//! Raw database messages are logged at `debug` and replaced with stable
//! messages so they never reach clients.

use tracing::debug;

use crate::domain::ports::UserPersistenceError;

use super::pool::PoolError;

/// Map pool failures to connection errors.
pub(super) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel failures to query or connection errors.
pub(super) fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DeserializationError(_) => {
            UserPersistenceError::query("stored user could not be decoded")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PoolError::checkout("timed out"))]
    #[case(PoolError::build("bad url"))]
    fn pool_errors_become_connection_errors(#[case] error: PoolError) {
        assert!(matches!(
            map_pool_error(error),
            UserPersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert_eq!(err, UserPersistenceError::query("record not found"));
    }

    #[rstest]
    fn rollback_maps_to_generic_query_error() {
        let err = map_diesel_error(diesel::result::Error::RollbackTransaction);
        assert_eq!(err, UserPersistenceError::query("database error"));
    }
}
