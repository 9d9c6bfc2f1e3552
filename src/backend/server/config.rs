/**
 * Server Configuration
 *
 * This module turns the database settings from `AppConfig` into a migrated
 * connection pool.
 *
 * # Error Handling
 *
 * `load_database` logs failures and returns `None` so the server can still
 * start (catalogue endpoints then answer 503). `connect_database` returns the
 * error for callers that need the pool, such as tests and tooling.
 */

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

use crate::shared::AppConfig;

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<AnyPool>;

/// Connect to a database and apply the bundled migrations
///
/// Accepts any URL understood by the sqlx `Any` driver (`postgres://...`,
/// `sqlite:...`).
pub async fn connect_database(url: &str, max_connections: u32) -> Result<AnyPool, sqlx::Error> {
    sqlx::any::install_default_drivers();

    let pool = AnyPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

/// Load and initialize the database connection pool
///
/// # Returns
///
/// - `Some(AnyPool)` if database is successfully configured and migrated
/// - `None` if `DATABASE_URL` is not set or the connection fails
pub async fn load_database(config: &AppConfig) -> DatabaseConfig {
    let database_url = match &config.database_url {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database and running migrations...");

    match connect_database(database_url, config.max_connections).await {
        Ok(pool) => {
            tracing::info!(
                "Database ready (max {} connections)",
                config.max_connections
            );
            Some(pool)
        }
        Err(e) => {
            tracing::error!("Failed to prepare database: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            None
        }
    }
}
