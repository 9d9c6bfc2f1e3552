//! Backend Module
//!
//! This module contains all server-side code: an Axum HTTP server exposing
//! the collection ordering API over a sqlx connection pool.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, database setup
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`catalogue`** - Collection resolver, reorder engine and handlers
//! - **`error`** - Backend error type and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── catalogue/      - Resolver, reorder engine, handlers
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the optional `AnyPool` and the reorder options. Handlers
//! extract the parts they need through `FromRef`.
//!
//! # Thread Safety
//!
//! Every request runs on its own tokio task. The pool is shared process-wide;
//! a reorder holds exactly one pooled connection for the life of its
//! transaction and returns it on every exit path.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Collections and ordered memberships
pub mod catalogue;

/// Backend error types
pub mod error;

pub use catalogue::{reorder_collection, resolve_collection, CatalogueError, CollectionId};
pub use error::BackendError;
pub use server::create_app;
