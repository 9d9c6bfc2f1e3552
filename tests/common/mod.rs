//! Common test utilities and helpers
//!
//! Database fixtures for the catalogue tests:
//! - migrated SQLite pools (in-memory, or file-backed for multi-connection tests)
//! - collection seeding
//! - position snapshots
//! - statement-level fault injection through SQLite triggers

#![allow(dead_code)]

use std::path::Path;

use sqlx::AnyPool;

use catalogue_admin::backend::server::connect_database;
use catalogue_admin::shared::config::DEFAULT_DISPLACEMENT_OFFSET;

/// Single-connection in-memory database
///
/// Every connection to `sqlite::memory:` is its own database, so the pool is
/// capped at one connection.
pub async fn memory_pool() -> AnyPool {
    connect_database("sqlite::memory:", 1)
        .await
        .expect("Failed to create in-memory test database")
}

/// File-backed database shared by several pooled connections
pub async fn file_pool(dir: &Path, max_connections: u32) -> AnyPool {
    let url = format!("sqlite://{}?mode=rwc", dir.join("catalogue.db").display());
    let pool = connect_database(&url, max_connections)
        .await
        .expect("Failed to create file test database");

    // Persistent for the file: readers never wait on the writer
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await
        .expect("Failed to enable WAL");

    pool
}

/// Insert a collection whose posts sit at positions `1..=N` in the given order
pub async fn seed_collection(pool: &AnyPool, collection_id: i64, slug: &str, post_ids: &[i64]) {
    sqlx::query("INSERT INTO collections (id, slug, name) VALUES ($1, $2, $3)")
        .bind(collection_id)
        .bind(slug)
        .bind(format!("Collection {}", slug))
        .execute(pool)
        .await
        .expect("Failed to insert collection");

    for (index, post_id) in post_ids.iter().enumerate() {
        sqlx::query("INSERT INTO posts (id, title) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(*post_id)
            .bind(format!("Post {}", post_id))
            .execute(pool)
            .await
            .expect("Failed to insert post");

        sqlx::query(
            "INSERT INTO collection_posts (collection_id, post_id, position) VALUES ($1, $2, $3)",
        )
        .bind(collection_id)
        .bind(*post_id)
        .bind(index as i64 + 1)
        .execute(pool)
        .await
        .expect("Failed to insert membership");
    }
}

/// `(post_id, position)` pairs of a collection, sorted by position
pub async fn positions(pool: &AnyPool, collection_id: i64) -> Vec<(i64, i64)> {
    #[derive(sqlx::FromRow)]
    struct Row {
        post_id: i64,
        position: i64,
    }

    sqlx::query_as::<_, Row>(
        "SELECT post_id, position FROM collection_posts WHERE collection_id = $1 ORDER BY position",
    )
    .bind(collection_id)
    .fetch_all(pool)
    .await
    .expect("Failed to read positions")
    .into_iter()
    .map(|row| (row.post_id, row.position))
    .collect()
}

/// Post ids of a collection in stored order
pub async fn stored_order(pool: &AnyPool, collection_id: i64) -> Vec<i64> {
    positions(pool, collection_id)
        .await
        .into_iter()
        .map(|(post_id, _)| post_id)
        .collect()
}

/// Positions `1..=order.len()` assigned in `order`
pub fn expected_positions(order: &[i64]) -> Vec<(i64, i64)> {
    order
        .iter()
        .enumerate()
        .map(|(index, post_id)| (*post_id, index as i64 + 1))
        .collect()
}

/// Which pass of the reorder a fault should hit
#[derive(Debug, Clone, Copy)]
pub enum Phase {
    Displacement,
    Settlement,
}

/// Make every update of `post_id`'s position in the given phase fail
pub async fn inject_fault(pool: &AnyPool, post_id: i64, phase: Phase) {
    let (name, condition) = match phase {
        Phase::Displacement => ("fail_displacement", format!("NEW.position > {}", DEFAULT_DISPLACEMENT_OFFSET)),
        Phase::Settlement => ("fail_settlement", format!("NEW.position <= {}", DEFAULT_DISPLACEMENT_OFFSET)),
    };

    let sql = format!(
        "CREATE TRIGGER {name} BEFORE UPDATE OF position ON collection_posts \
         WHEN NEW.post_id = {post_id} AND {condition} \
         BEGIN SELECT RAISE(ABORT, 'injected fault'); END"
    );
    sqlx::query(&sql)
        .execute(pool)
        .await
        .expect("Failed to install fault trigger");
}
