/**
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised directly by a handler with an explicit status, e.g. when the
 * database is not configured.
 *
 * ## Catalogue Errors
 *
 * Raised by the resolver and reorder engine. Caller mistakes map to 4xx;
 * persistence failures and timeouts map to an opaque 500.
 *
 * ## Shared Errors
 *
 * Request payload validation failures, always 400.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::catalogue::CatalogueError;
use crate::shared::SharedError;

/// Public message for every 5xx response
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use axum::http::StatusCode;
/// use catalogue_admin::backend::error::BackendError;
///
/// let err = BackendError::handler(StatusCode::SERVICE_UNAVAILABLE, "Database not configured");
/// assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Resolver or reorder engine error
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// Request payload error
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - the status carried by the error
    /// - `CollectionNotFound` - 404 Not Found
    /// - other caller-side catalogue errors - 400 Bad Request
    /// - `Persistence`, `Timeout` - 500 Internal Server Error
    /// - `SharedError` - 400 Bad Request
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Catalogue(err) => match err {
                CatalogueError::CollectionNotFound(_) => StatusCode::NOT_FOUND,
                CatalogueError::EmptyOrder
                | CatalogueError::DuplicatePost { .. }
                | CatalogueError::MembershipMismatch { .. }
                | CatalogueError::CollectionTooLarge { .. } => StatusCode::BAD_REQUEST,
                CatalogueError::Timeout { .. } | CatalogueError::Persistence(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the message returned to the caller
    ///
    /// Server-side failures are reported as `"Internal server error"`; the
    /// detail stays in the logs.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Catalogue(err) => match err {
                CatalogueError::CollectionNotFound(_) => "Collection not found".to_string(),
                CatalogueError::EmptyOrder => err.to_string(),
                CatalogueError::DuplicatePost { .. } => "Post IDs must be unique".to_string(),
                CatalogueError::MembershipMismatch { .. } => {
                    "Post IDs must match the collection's posts".to_string()
                }
                CatalogueError::CollectionTooLarge { .. } => {
                    "Collection is too large to reorder".to_string()
                }
                CatalogueError::Timeout { .. } | CatalogueError::Persistence(_) => {
                    INTERNAL_SERVER_ERROR_MESSAGE.to_string()
                }
            },
            Self::SharedError(err) => err.public_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::catalogue::CollectionId;
    use std::time::Duration;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::SERVICE_UNAVAILABLE, "Database not configured");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(message, "Database not configured");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_not_found_mapping() {
        let error: BackendError = CatalogueError::CollectionNotFound("does-not-exist".into()).into();
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.message(), "Collection not found");
    }

    #[test]
    fn test_malformed_input_mapping() {
        let empty: BackendError = CatalogueError::EmptyOrder.into();
        assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(empty.message(), "Post IDs array is required");

        let duplicate: BackendError = CatalogueError::DuplicatePost { post_id: 2 }.into();
        assert_eq!(duplicate.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(duplicate.message(), "Post IDs must be unique");

        let mismatch: BackendError = CatalogueError::MembershipMismatch {
            collection_id: CollectionId(1),
            missing: vec![1],
            unknown: vec![],
        }
        .into();
        assert_eq!(mismatch.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_persistence_detail_is_hidden() {
        let error: BackendError =
            CatalogueError::Persistence(sqlx::Error::Protocol("connection reset".into())).into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), INTERNAL_SERVER_ERROR_MESSAGE);
        assert!(error.to_string().contains("connection reset"));
    }

    #[test]
    fn test_timeout_is_a_server_error() {
        let error: BackendError = CatalogueError::Timeout {
            collection_id: CollectionId(1),
            timeout: Duration::from_secs(1),
        }
        .into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), INTERNAL_SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn test_from_shared_error() {
        let error: BackendError = SharedError::validation("postIds", "Post IDs array is required").into();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Post IDs array is required");
    }
}
