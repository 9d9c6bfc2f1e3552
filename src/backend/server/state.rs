/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Thread Safety
 *
 * `AnyPool` is internally reference counted and safe to clone into every
 * request; `ReorderOptions` is `Copy`. Nothing in the state is mutated after
 * startup.
 *
 * # Example
 *
 * ```rust
 * use axum::extract::State;
 * use sqlx::AnyPool;
 *
 * async fn handler(State(pool): State<Option<AnyPool>>) {
 *     // `None` when DATABASE_URL is unset
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::AnyPool;

use crate::backend::catalogue::ReorderOptions;

/// Application state shared by every handler
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    ///
    /// `None` if the database is not configured. Handlers answer 503 in
    /// that case.
    pub db_pool: Option<AnyPool>,

    /// Displacement offset and deadline used by the reorder engine
    pub reorder_options: ReorderOptions,
}

impl AppState {
    pub fn new(db_pool: Option<AnyPool>, reorder_options: ReorderOptions) -> Self {
        Self {
            db_pool,
            reorder_options,
        }
    }
}

/// Implement FromRef for Option<AnyPool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<AnyPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for ReorderOptions {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.reorder_options
    }
}
