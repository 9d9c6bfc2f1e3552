/**
 * Catalogue Error Types
 *
 * Errors raised by the collection resolver and the reorder engine. Caller
 * mistakes (unknown slug, malformed order) are kept apart from persistence
 * failures so the HTTP layer can map the former to 4xx responses and keep
 * the latter opaque.
 */
use std::time::Duration;
use thiserror::Error;

use crate::backend::catalogue::CollectionId;

/// Errors produced by catalogue operations
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// No collection matches the given slug or id
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// The requested order contains no posts
    #[error("Post IDs array is required")]
    EmptyOrder,

    /// The requested order names the same post twice
    #[error("Post {post_id} appears more than once in the requested order")]
    DuplicatePost { post_id: i64 },

    /// The requested order is not exactly the collection's current member set
    #[error("Post IDs do not match collection {collection_id}: missing {missing:?}, unknown {unknown:?}")]
    MembershipMismatch {
        collection_id: CollectionId,
        /// Current members absent from the request
        missing: Vec<i64>,
        /// Requested ids that are not members
        unknown: Vec<i64>,
    },

    /// Displaced positions would overlap settled positions
    #[error("Collection of {len} posts cannot be reordered with displacement offset {offset}")]
    CollectionTooLarge { len: usize, offset: i64 },

    /// The reorder transaction did not finish before its deadline
    #[error("Reorder of collection {collection_id} exceeded {timeout:?}")]
    Timeout {
        collection_id: CollectionId,
        timeout: Duration,
    },

    /// Any database failure
    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl CatalogueError {
    /// Whether the request itself was at fault
    ///
    /// Caller errors are never retried and never logged as server faults.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Self::Persistence(_) | Self::Timeout { .. })
    }
}
