//! Catalogue Module
//!
//! Ordered membership of posts in collections.
//!
//! # Architecture
//!
//! - **`resolver`** - slug to collection id lookup
//! - **`reorder`** - the two-phase reorder engine
//! - **`db`** - ordered membership reads
//! - **`handlers`** - HTTP handlers for the collection endpoints
//! - **`error`** - catalogue error taxonomy
//!
//! # Module Structure
//!
//! ```text
//! catalogue/
//! ├── mod.rs       - Module exports and documentation
//! ├── error.rs     - CatalogueError
//! ├── resolver.rs  - Collection resolver
//! ├── reorder.rs   - Reorder engine
//! ├── db.rs        - Membership listing
//! └── handlers.rs  - Axum handlers
//! ```
//!
//! # Request Flow
//!
//! ```text
//! PUT /api/collections/{slug}/posts/order
//!   -> body validation (no database access)
//!   -> resolve_collection(slug)
//!   -> reorder_collection(id, postIds)   one transaction, 2N updates
//! ```

use std::fmt;

pub mod db;
pub mod error;
pub mod handlers;
pub mod reorder;
pub mod resolver;

pub use db::list_collection_posts;
pub use error::CatalogueError;
pub use handlers::{list_posts, reorder_posts};
pub use reorder::{reorder_collection, validate_order, ReorderOptions, ReorderSummary};
pub use resolver::resolve_collection;

/// Internal key of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionId(pub i64);

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
