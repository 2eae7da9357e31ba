//! Error handling for salesdb-store
//!
//! Translates low-level `rusqlite` failures into the canonical `ExError`,
//! keeping the driver's message intact and classifying it by kind.

use rusqlite::ErrorCode;
use salesdb_core::errors::{DaoError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a store error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = classify(&err);
    tracing::debug!(err_kind = ?kind, error = %err, "translated sqlite error");
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create a connection error from a failure while opening or configuring
/// a connection. Always `Connection`, whatever the underlying code.
pub fn connection_error(err: rusqlite::Error) -> ExError {
    tracing::debug!(error = %err, "connection failed");
    ExError::new(ExErrorKind::Connection)
        .with_op("connect")
        .with_message(err.to_string())
}

/// Create a configuration error for a single key
pub fn config_error(key: &str, reason: impl Into<String>) -> ExError {
    ExError::from(DaoError::InvalidConfig {
        key: key.to_string(),
        reason: reason.into(),
    })
    .with_op("load_config")
}

fn classify(err: &rusqlite::Error) -> ExErrorKind {
    match err {
        rusqlite::Error::QueryReturnedNoRows => ExErrorKind::NotFound,
        rusqlite::Error::InvalidPath(_) => ExErrorKind::Connection,
        rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
            ErrorCode::ConstraintViolation => ExErrorKind::ConstraintViolation,
            ErrorCode::CannotOpen | ErrorCode::NotADatabase | ErrorCode::PermissionDenied => {
                ExErrorKind::Connection
            }
            _ => ExErrorKind::Persistence,
        },
        _ => ExErrorKind::Persistence,
    }
}
