//! Shared Module
//!
//! This module contains the types that cross the HTTP boundary: request and
//! response bodies for the catalogue API, payload validation errors, and the
//! application configuration. Nothing here touches the database.

/// Catalogue request/response types
pub mod catalogue;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use catalogue::{
    CollectionPost, CollectionPostsResponse, ErrorResponse, ReorderPostsRequest,
    ReorderPostsResponse,
};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
