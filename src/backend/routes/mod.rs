//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, health check, fallback
//! └── api_routes.rs   - Collection API endpoints
//! ```
//!
//! # Route Types
//!
//! - `GET /health` - Liveness
//! - `GET /api/collections/{slug}/posts` - Ordered listing
//! - `PUT /api/collections/{slug}/posts/order` - Reorder

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

pub use router::create_router;
