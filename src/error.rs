//! Error types for the library server

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::response::handle_error;

/// SQLSTATE raised when a row is still referenced by a foreign key
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// SQLSTATE raised by unique indexes
const UNIQUE_VIOLATION: &str = "23505";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Error scanning {entity}: {source}")]
    Scan {
        entity: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status code and client-facing message for this error.
    ///
    /// Store and I/O failures only expose a generic message; the detail is
    /// logged by [`handle_error`].
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(msg) | AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error executing query".to_string(),
            ),
            AppError::Scan { entity, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error scanning {}", entity),
            ),
            AppError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error saving file".to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }

    /// Replace foreign key and unique violations with `on_violation`, keep
    /// everything else as a database error.
    pub fn from_constraint(err: sqlx::Error, on_violation: impl FnOnce() -> AppError) -> Self {
        let code = err
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| code.into_owned());

        match code.as_deref() {
            Some(FOREIGN_KEY_VIOLATION) | Some(UNIQUE_VIOLATION) => on_violation(),
            _ => AppError::Database(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        handle_error(&message, &self, status)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {}", rejection.body_text());
        AppError::BadRequest("Invalid JSON data".to_string())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameter: {}", rejection.body_text());
        AppError::BadRequest("invalid id".to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        AppError::BadRequest("Invalid query parameters".to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_hide_details() {
        let err = AppError::Database(sqlx::Error::PoolTimedOut);
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Error executing query");

        let err = AppError::Scan {
            entity: "authors",
            source: sqlx::Error::Protocol("iteration error".to_string()),
        };
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Error scanning authors");
        assert!(err.to_string().contains("iteration error"));
    }

    #[test]
    fn client_errors_keep_message() {
        let (status, message) =
            AppError::Conflict("Book is already borrowed".to_string()).status_and_message();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(message, "Book is already borrowed");

        let (status, _) = AppError::NotFound("Book 3 not found".to_string()).status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = AppError::Validation("bad".to_string()).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn non_constraint_errors_stay_database_errors() {
        let err = AppError::from_constraint(sqlx::Error::RowNotFound, || {
            AppError::Conflict("in use".to_string())
        });
        assert!(matches!(err, AppError::Database(_)));
    }
}
