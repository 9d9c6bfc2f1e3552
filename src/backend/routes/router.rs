/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health check
 * 2. API routes (collections)
 * 3. Fallback handler (404)
 */

use axum::{extract::State, Json, Router};
use serde_json::{json, Value};
use sqlx::AnyPool;
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// - `GET /health` - liveness plus whether a database is configured
/// - `GET /api/collections/{slug}/posts` - ordered listing
/// - `PUT /api/collections/{slug}/posts/order` - reorder
///
/// Every request is traced through `TraceLayer`.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", axum::routing::get(health));

    let router = configure_api_routes(router);

    let router = router.fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") });

    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}

async fn health(State(pool): State<Option<AnyPool>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "database": pool.is_some(),
    }))
}
