//! Adapter from `sqlx` errors to classified store errors.

use permit_core::store::{StoreError, StoreErrorKind};

/// Classify a driver error at the persistence boundary.
pub(crate) fn store_error(context: &str, err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) => StoreError::from_code(
            db.code().map(|c| c.into_owned()),
            format!("{context}: {}", db.message()),
        ),
        sqlx::Error::RowNotFound => StoreError::not_found(context),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::new(StoreErrorKind::Unavailable, format!("{context}: {err}"))
        }
        _ => StoreError::new(StoreErrorKind::Other, format!("{context}: {err}")),
    }
}
