/**
 * Catalogue Wire Types
 *
 * Request and response bodies for the collection ordering API. The JSON
 * field names follow the admin client's camelCase convention.
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::error::SharedError;

/// Message returned to the caller when a reorder commits
pub const ORDER_UPDATED_MESSAGE: &str = "Post order updated successfully";

/// Message returned when `postIds` is absent, not an array, or empty
pub const POST_IDS_REQUIRED: &str = "Post IDs array is required";

/// Reorder request body
///
/// `post_ids` is the complete desired order of the collection's posts,
/// first element first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPostsRequest {
    pub post_ids: Vec<i64>,
}

impl ReorderPostsRequest {
    /// Extract the request from an arbitrary JSON body
    ///
    /// The body is accepted loosely so that every shape problem (missing
    /// field, wrong type, non-integer element) reports the same validation
    /// error instead of a framework rejection. Emptiness and duplicates are
    /// left to the reorder engine.
    pub fn from_json(body: &Value) -> Result<Self, SharedError> {
        let items = body
            .get("postIds")
            .and_then(Value::as_array)
            .ok_or_else(|| SharedError::validation("postIds", POST_IDS_REQUIRED))?;

        let post_ids = items
            .iter()
            .map(Value::as_i64)
            .collect::<Option<Vec<i64>>>()
            .ok_or_else(|| SharedError::validation("postIds", POST_IDS_REQUIRED))?;

        Ok(Self { post_ids })
    }
}

/// Successful reorder response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReorderPostsResponse {
    pub success: bool,
    pub message: String,
}

impl ReorderPostsResponse {
    pub fn updated() -> Self {
        Self {
            success: true,
            message: ORDER_UPDATED_MESSAGE.to_string(),
        }
    }
}

/// One post as it sits in a collection
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPost {
    pub post_id: i64,
    pub title: String,
    pub position: i64,
}

/// Ordered listing of a collection's posts
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CollectionPostsResponse {
    pub success: bool,
    pub posts: Vec<CollectionPost>,
}

/// Failure envelope shared by every catalogue endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
