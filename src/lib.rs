//! Catalogue Admin - Main Library
//!
//! Administrative backend for an ordered catalogue of posts grouped into
//! collections.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that cross the HTTP boundary
//!   - Request/response bodies for the collection API
//!   - Payload validation errors
//!   - Application configuration
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server and routes
//!   - Collection resolver and reorder engine
//!   - Database pool and migrations (sqlx)
//!
//! # Reordering
//!
//! `PUT /api/collections/{slug}/posts/order` with `{"postIds": [...]}`
//! rewrites the positions of every post in the collection inside one
//! transaction. Positions are first moved to a staging range above
//! `DISPLACEMENT_OFFSET`, then settled to `1..=N`, so the
//! `(collection_id, position)` uniqueness constraint holds after every
//! statement. Either the whole order is committed or nothing changes.
//!
//! # Usage
//!
//! ```rust,no_run
//! use catalogue_admin::backend::server::create_app;
//! use catalogue_admin::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for payload problems
//! - `backend::CatalogueError` for resolver/engine outcomes
//! - `backend::BackendError` for HTTP responses

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
