//! Error taxonomy for the service and store layers.

use thiserror::Error;

/// Persistence failures, independent of the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint was violated (duplicate project or member name).
    #[error("unique constraint violated")]
    Conflict,

    /// Anything else the backend reported.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => StoreError::Conflict,
            _ => StoreError::Backend(err.into()),
        }
    }
}

/// Errors surfaced to API callers. The display strings are the user-facing
/// message bodies, so they carry the application's configured language.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing/empty required field or invalid field value (HTTP 400)
    #[error("{0}")]
    Validation(String),

    /// Duplicate unique name (HTTP 409)
    #[error("{0}")]
    Conflict(String),

    /// Wrong or missing deletion authorization code (HTTP 401)
    #[error("{0}")]
    Unauthorized(String),

    /// The id does not resolve to a record (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure; the cause is logged, never sent to the caller
    /// (HTTP 500)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            // Conflicts expected by an operation are mapped to a
            // caller-facing message at the call site before this runs.
            StoreError::Conflict => {
                ServiceError::Internal(anyhow::anyhow!("unexpected unique constraint violation"))
            }
            StoreError::Backend(err) => ServiceError::Internal(err),
        }
    }
}
