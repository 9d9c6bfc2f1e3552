/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Collections
 * - `GET /api/collections/{slug}/posts` - posts in stored order
 * - `PUT /api/collections/{slug}/posts/order` - persist a new order
 */

use axum::Router;

use crate::backend::catalogue::{list_posts, reorder_posts};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Authentication is handled in front of this service and is not checked
/// here.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/collections/{slug}/posts",
            axum::routing::get(list_posts),
        )
        .route(
            "/api/collections/{slug}/posts/order",
            axum::routing::put(reorder_posts),
        )
}
