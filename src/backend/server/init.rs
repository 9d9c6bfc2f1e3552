/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server.
 *
 * # Initialization Process
 *
 * 1. Load the optional database pool (migrations included)
 * 2. Derive reorder options from the configuration
 * 3. Create the router with all routes and middleware
 */

use axum::Router;

use crate::backend::catalogue::ReorderOptions;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// - Missing database: server continues; catalogue endpoints answer 503
/// - Connection or migration failures: logged, same as a missing database
pub async fn create_app(config: &AppConfig) -> Router<()> {
    tracing::info!("Initializing catalogue backend server");

    let db_pool = load_database(config).await;
    let reorder_options = ReorderOptions::from(config);

    tracing::info!(
        "Reorder engine: displacement offset {}, timeout {:?}",
        reorder_options.displacement_offset,
        reorder_options.timeout
    );

    create_router(AppState::new(db_pool, reorder_options))
}
