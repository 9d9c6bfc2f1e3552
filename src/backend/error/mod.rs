//! Backend Error Module
//!
//! This module defines the error type returned by HTTP handlers and its
//! conversion into JSON responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and its status/message mapping
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return
//! `Result<Json<T>, BackendError>` and every failure becomes a
//! `{"success": false, "error": "..."}` body with the mapped status.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{BackendError, INTERNAL_SERVER_ERROR_MESSAGE};
