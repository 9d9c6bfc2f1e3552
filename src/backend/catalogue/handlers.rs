/**
 * Collection Handlers
 *
 * HTTP handlers for reading and reordering a collection's posts.
 *
 * # Routes
 *
 * - `GET /api/collections/{slug}/posts` - posts in their stored order
 * - `PUT /api/collections/{slug}/posts/order` - persist a new order
 */
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use sqlx::AnyPool;

use crate::backend::catalogue::{
    list_collection_posts, reorder_collection, resolve_collection, validate_order, ReorderOptions,
};
use crate::backend::error::BackendError;
use crate::shared::catalogue::POST_IDS_REQUIRED;
use crate::shared::{
    CollectionPostsResponse, ReorderPostsRequest, ReorderPostsResponse, SharedError,
};

fn require_pool(pool: Option<AnyPool>) -> Result<AnyPool, BackendError> {
    pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::handler(StatusCode::SERVICE_UNAVAILABLE, "Database not configured")
    })
}

/// Reorder handler
///
/// Validates the body, resolves the slug, then runs the reorder engine.
/// Body problems are reported before the database is consulted at all.
///
/// # Errors
///
/// * `400 Bad Request` - `postIds` missing, not an integer array, empty,
///   duplicated, or not the collection's exact member set
/// * `404 Not Found` - unknown slug
/// * `500 Internal Server Error` - any persistence failure or timeout
/// * `503 Service Unavailable` - database not configured
///
/// # Example Request
///
/// ```http
/// PUT /api/collections/travel/posts/order HTTP/1.1
/// Content-Type: application/json
///
/// { "postIds": [3, 1, 2] }
/// ```
///
/// # Example Response
///
/// ```json
/// { "success": true, "message": "Post order updated successfully" }
/// ```
pub async fn reorder_posts(
    State(pool): State<Option<AnyPool>>,
    State(options): State<ReorderOptions>,
    Path(slug): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ReorderPostsResponse>, BackendError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::warn!("Unreadable reorder body for '{}': {}", slug, rejection);
        SharedError::validation("postIds", POST_IDS_REQUIRED)
    })?;
    let request = ReorderPostsRequest::from_json(&body)?;
    validate_order(&request.post_ids, options.displacement_offset)?;

    let pool = require_pool(pool)?;
    tracing::info!("Reorder request for '{}' with {} posts", slug, request.post_ids.len());

    let collection_id = resolve_collection(&pool, &slug).await?;
    reorder_collection(&pool, collection_id, &request.post_ids, options).await?;

    Ok(Json(ReorderPostsResponse::updated()))
}

/// List handler
///
/// Returns the collection's posts sorted by position.
///
/// # Errors
///
/// * `404 Not Found` - unknown slug
/// * `500 Internal Server Error` - database failure
/// * `503 Service Unavailable` - database not configured
pub async fn list_posts(
    State(pool): State<Option<AnyPool>>,
    Path(slug): Path<String>,
) -> Result<Json<CollectionPostsResponse>, BackendError> {
    let pool = require_pool(pool)?;
    let collection_id = resolve_collection(&pool, &slug).await?;
    let posts = list_collection_posts(&pool, collection_id).await?;

    Ok(Json(CollectionPostsResponse {
        success: true,
        posts,
    }))
}
