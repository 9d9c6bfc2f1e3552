/**
 * Reorder Engine
 *
 * Persists a caller-supplied order for every post in a collection.
 *
 * # Two-phase rewrite
 *
 * `collection_posts` enforces `UNIQUE (collection_id, position)` on every
 * statement. Writing final positions directly can collide with a row that
 * has not been rewritten yet (swapping 1 and 2 puts two rows on 2). The
 * engine therefore runs two passes inside one transaction:
 *
 * 1. **Displacement** - post `i` moves to `offset + i + 1`, a range no
 *    legitimate position reaches.
 * 2. **Settlement** - post `i` moves to `i + 1`.
 *
 * Every intermediate state satisfies the constraint regardless of the order
 * the statements run in, and nothing is visible to other readers until the
 * commit.
 *
 * # Concurrency
 *
 * The first statement of the transaction locks the owning `collections`
 * row, which serializes concurrent reorders of the same collection
 * (last writer wins) without involving any other collection. PostgreSQL
 * takes a `FOR UPDATE` row lock. SQLite has no row locks, so there the
 * statement is a no-op write that claims the database write lock before
 * anything is read; a transaction that reads first and writes later can
 * fail with `SQLITE_BUSY` when it tries to upgrade its lock.
 */
use std::collections::HashSet;
use std::time::Duration;

use sqlx::{AnyConnection, AnyPool};

use crate::backend::catalogue::{CatalogueError, CollectionId};
use crate::shared::config::{AppConfig, DEFAULT_DISPLACEMENT_OFFSET, DEFAULT_REORDER_TIMEOUT};

/// Tunables for a reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderOptions {
    /// Base of the staging range used by the displacement phase
    pub displacement_offset: i64,
    /// Deadline for the whole transaction, including connection checkout
    pub timeout: Duration,
}

impl Default for ReorderOptions {
    fn default() -> Self {
        Self {
            displacement_offset: DEFAULT_DISPLACEMENT_OFFSET,
            timeout: DEFAULT_REORDER_TIMEOUT,
        }
    }
}

impl From<&AppConfig> for ReorderOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            displacement_offset: config.displacement_offset,
            timeout: config.reorder_timeout,
        }
    }
}

/// Outcome of a committed reorder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderSummary {
    pub collection_id: CollectionId,
    /// Number of posts in the new order
    pub posts: usize,
    /// Membership rows written across both phases (always `2 * posts`)
    pub rows_updated: u64,
}

/// Check an order before any transaction is opened
///
/// # Errors
///
/// * `EmptyOrder` - no ids
/// * `DuplicatePost` - an id repeats
/// * `CollectionTooLarge` - `post_ids.len()` reaches the displacement offset,
///   or a displaced position would not fit in an `i64`
pub fn validate_order(post_ids: &[i64], displacement_offset: i64) -> Result<(), CatalogueError> {
    if post_ids.is_empty() {
        return Err(CatalogueError::EmptyOrder);
    }

    let mut seen = HashSet::with_capacity(post_ids.len());
    for &post_id in post_ids {
        if !seen.insert(post_id) {
            return Err(CatalogueError::DuplicatePost { post_id });
        }
    }

    let len = post_ids.len();
    let highest = i64::try_from(len)
        .ok()
        .filter(|&len| len < displacement_offset)
        .and_then(|len| displacement_offset.checked_add(len));
    if highest.is_none() {
        return Err(CatalogueError::CollectionTooLarge {
            len,
            offset: displacement_offset,
        });
    }

    Ok(())
}

/// Reorder every post of a collection
///
/// `post_ids` must name exactly the collection's current members, first
/// element first. On success the stored positions are `1..=N` in that order.
/// On any error no position changes.
///
/// # Errors
///
/// * `EmptyOrder`, `DuplicatePost`, `CollectionTooLarge` - rejected before
///   touching the database
/// * `CollectionNotFound` - the collection row vanished
/// * `MembershipMismatch` - `post_ids` differs from the current member set
/// * `Timeout` - the deadline elapsed; the transaction is rolled back
/// * `Persistence` - any database failure; the transaction is rolled back
pub async fn reorder_collection(
    pool: &AnyPool,
    collection_id: CollectionId,
    post_ids: &[i64],
    options: ReorderOptions,
) -> Result<ReorderSummary, CatalogueError> {
    validate_order(post_ids, options.displacement_offset)?;

    // Dropping the in-flight future drops its `Transaction`, which rolls back
    // and hands the connection back to the pool.
    let result = tokio::time::timeout(
        options.timeout,
        run_transaction(pool, collection_id, post_ids, options.displacement_offset),
    )
    .await
    .unwrap_or(Err(CatalogueError::Timeout {
        collection_id,
        timeout: options.timeout,
    }));

    match &result {
        Ok(summary) => tracing::info!(
            "Reordered {} posts in collection {} ({} rows written)",
            summary.posts,
            collection_id,
            summary.rows_updated
        ),
        Err(e) if e.is_caller_error() => {
            tracing::warn!("Rejected reorder of collection {}: {}", collection_id, e)
        }
        Err(e) => tracing::error!("Reorder of collection {} failed: {:?}", collection_id, e),
    }

    result
}

async fn run_transaction(
    pool: &AnyPool,
    collection_id: CollectionId,
    post_ids: &[i64],
    displacement_offset: i64,
) -> Result<ReorderSummary, CatalogueError> {
    let mut tx = pool.begin().await?;

    match rewrite_positions(&mut tx, collection_id, post_ids, displacement_offset).await {
        Ok(summary) => {
            tx.commit().await?;
            Ok(summary)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    "Rollback of collection {} reorder failed: {:?}",
                    collection_id,
                    rollback_err
                );
            }
            Err(e)
        }
    }
}

async fn rewrite_positions(
    conn: &mut AnyConnection,
    collection_id: CollectionId,
    post_ids: &[i64],
    displacement_offset: i64,
) -> Result<ReorderSummary, CatalogueError> {
    lock_collection(conn, collection_id).await?;
    ensure_same_members(conn, collection_id, post_ids).await?;

    let displaced = write_positions(conn, collection_id, post_ids, displacement_offset).await?;
    tracing::debug!("Collection {}: displaced {} rows", collection_id, displaced);

    let settled = write_positions(conn, collection_id, post_ids, 0).await?;
    tracing::debug!("Collection {}: settled {} rows", collection_id, settled);

    Ok(ReorderSummary {
        collection_id,
        posts: post_ids.len(),
        rows_updated: displaced + settled,
    })
}

/// How a backend serializes writers on one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CollectionLock {
    /// `SELECT ... FOR UPDATE` on the collection row
    Row,
    /// No-op write that takes the database write lock
    Database,
}

impl CollectionLock {
    fn for_backend(backend_name: &str) -> Self {
        match backend_name {
            "PostgreSQL" => Self::Row,
            _ => Self::Database,
        }
    }
}

/// Lock the owning collection for the rest of the transaction
async fn lock_collection(
    conn: &mut AnyConnection,
    collection_id: CollectionId,
) -> Result<(), CatalogueError> {
    let found = match CollectionLock::for_backend(conn.backend_name()) {
        CollectionLock::Row => {
            let id: Option<i64> = sqlx::query_scalar(
                r#"
                SELECT id
                FROM collections
                WHERE id = $1
                FOR UPDATE
                "#,
            )
            .bind(collection_id.0)
            .fetch_optional(&mut *conn)
            .await?;
            id.is_some()
        }
        CollectionLock::Database => {
            let result = sqlx::query(
                r#"
                UPDATE collections
                SET slug = slug
                WHERE id = $1
                "#,
            )
            .bind(collection_id.0)
            .execute(&mut *conn)
            .await?;
            result.rows_affected() > 0
        }
    };

    if !found {
        return Err(CatalogueError::CollectionNotFound(collection_id.to_string()));
    }
    Ok(())
}

async fn ensure_same_members(
    conn: &mut AnyConnection,
    collection_id: CollectionId,
    post_ids: &[i64],
) -> Result<(), CatalogueError> {
    let current: Vec<i64> = sqlx::query_scalar(
        r#"
        SELECT post_id
        FROM collection_posts
        WHERE collection_id = $1
        "#,
    )
    .bind(collection_id.0)
    .fetch_all(&mut *conn)
    .await?;

    let (missing, unknown) = membership_difference(&current, post_ids);
    if missing.is_empty() && unknown.is_empty() {
        Ok(())
    } else {
        Err(CatalogueError::MembershipMismatch {
            collection_id,
            missing,
            unknown,
        })
    }
}

/// Ids in `current` but not `requested`, and ids in `requested` but not `current`, both sorted
fn membership_difference(current: &[i64], requested: &[i64]) -> (Vec<i64>, Vec<i64>) {
    let current_set: HashSet<i64> = current.iter().copied().collect();
    let requested_set: HashSet<i64> = requested.iter().copied().collect();

    let mut missing: Vec<i64> = current_set.difference(&requested_set).copied().collect();
    let mut unknown: Vec<i64> = requested_set.difference(&current_set).copied().collect();
    missing.sort_unstable();
    unknown.sort_unstable();
    (missing, unknown)
}

/// Write `base + i + 1` as the position of the `i`th post
async fn write_positions(
    conn: &mut AnyConnection,
    collection_id: CollectionId,
    post_ids: &[i64],
    base: i64,
) -> Result<u64, CatalogueError> {
    let mut written = 0;

    for (index, post_id) in post_ids.iter().enumerate() {
        let position = i64::try_from(index + 1)
            .ok()
            .and_then(|rank| base.checked_add(rank))
            .ok_or(CatalogueError::CollectionTooLarge {
                len: post_ids.len(),
                offset: base,
            })?;
        let result = sqlx::query(
            r#"
            UPDATE collection_posts
            SET position = $1
            WHERE collection_id = $2 AND post_id = $3
            "#,
        )
        .bind(position)
        .bind(collection_id.0)
        .bind(*post_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() != 1 {
            tracing::error!(
                "Membership of post {} in collection {} disappeared mid-reorder",
                post_id,
                collection_id
            );
            return Err(sqlx::Error::RowNotFound.into());
        }
        written += 1;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_validate_accepts_permutation() {
        assert!(validate_order(&[3, 1, 2], DEFAULT_DISPLACEMENT_OFFSET).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert_matches!(
            validate_order(&[], DEFAULT_DISPLACEMENT_OFFSET),
            Err(CatalogueError::EmptyOrder)
        );
    }

    #[test]
    fn test_validate_reports_first_duplicate() {
        assert_matches!(
            validate_order(&[5, 6, 5, 6], DEFAULT_DISPLACEMENT_OFFSET),
            Err(CatalogueError::DuplicatePost { post_id: 5 })
        );
    }

    #[test]
    fn test_validate_rejects_order_reaching_offset() {
        assert!(validate_order(&[1, 2, 3], 4).is_ok());
        assert_matches!(
            validate_order(&[1, 2, 3, 4], 4),
            Err(CatalogueError::CollectionTooLarge { len: 4, offset: 4 })
        );
    }

    #[test]
    fn test_validate_rejects_offset_that_would_overflow() {
        assert_matches!(
            validate_order(&[2, 1], i64::MAX),
            Err(CatalogueError::CollectionTooLarge { len: 2, offset: i64::MAX })
        );
        assert_matches!(
            validate_order(&[2, 1], i64::MAX - 1),
            Err(CatalogueError::CollectionTooLarge { len: 2, .. })
        );
        assert!(validate_order(&[2, 1], i64::MAX - 2).is_ok());
    }

    #[test]
    fn test_lock_follows_backend() {
        assert_eq!(CollectionLock::for_backend("PostgreSQL"), CollectionLock::Row);
        assert_eq!(CollectionLock::for_backend("SQLite"), CollectionLock::Database);
    }

    #[test]
    fn test_membership_difference() {
        let (missing, unknown) = membership_difference(&[1, 2, 3], &[3, 9, 1]);
        assert_eq!(missing, vec![2]);
        assert_eq!(unknown, vec![9]);

        let (missing, unknown) = membership_difference(&[1, 2, 3], &[2, 3, 1]);
        assert!(missing.is_empty());
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_options_follow_config() {
        let config = AppConfig::builder()
            .displacement_offset(500)
            .reorder_timeout(Duration::from_millis(40))
            .build()
            .unwrap();
        let options = ReorderOptions::from(&config);
        assert_eq!(options.displacement_offset, 500);
        assert_eq!(options.timeout, Duration::from_millis(40));
    }
}
