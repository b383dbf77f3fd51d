//! SQL storage error conversion.

use sn_storage::StorageError;
use sqlx::Error as SqlxError;

/// Converts a `SQLx` error to a storage error.
///
/// The entity name feeds the `Duplicate` variant when the database
/// reports a unique constraint violation (`PostgreSQL` code 23505).
#[allow(clippy::needless_pass_by_value)]
pub fn from_sqlx_error(entity: &'static str, err: SqlxError) -> StorageError {
    match err {
        SqlxError::RowNotFound => StorageError::not_found(entity),
        SqlxError::Database(db_err) => {
            if db_err.code().is_some_and(|c| c == "23505") {
                StorageError::duplicate(entity, db_err.message().to_string())
            } else {
                StorageError::Query(db_err.to_string())
            }
        }
        SqlxError::PoolTimedOut => StorageError::Connection("connection pool timeout".to_string()),
        SqlxError::PoolClosed => StorageError::Connection("connection pool closed".to_string()),
        _ => StorageError::Internal(err.to_string()),
    }
}
