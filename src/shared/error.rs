//! Shared Error Types
//!
//! This module defines error types for request payloads that are validated
//! before any backend component runs. They describe what is wrong with the
//! input, not how the server reacts to it.
//!
//! # Error Categories
//!
//! - `ValidationError` - Data validation failures on a named field
//!
//! # Usage
//!
//! ```rust
//! use catalogue_admin::shared::error::SharedError;
//!
//! let error = SharedError::validation("postIds", "Post IDs array is required");
//! ```
use thiserror::Error;

/// Error types raised while decoding or validating shared payloads
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Message suitable for returning to the API caller
    pub fn public_message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("postIds", "Post IDs array is required");
        match error {
            SharedError::ValidationError { field, message } => {
                assert_eq!(field, "postIds");
                assert_eq!(message, "Post IDs array is required");
            }
        }
    }

    #[test]
    fn test_error_display() {
        let error = SharedError::validation("postIds", "must be an array");
        let display = format!("{}", error);
        assert!(display.contains("postIds"));
        assert!(display.contains("must be an array"));
    }

    #[test]
    fn test_public_message_omits_field_name() {
        let error = SharedError::validation("postIds", "Post IDs array is required");
        assert_eq!(error.public_message(), "Post IDs array is required");
    }
}
