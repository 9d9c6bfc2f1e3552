/**
 * Database Reads for Collection Memberships
 */
use sqlx::AnyPool;

use crate::backend::catalogue::{CatalogueError, CollectionId};
use crate::shared::CollectionPost;

/// Load a collection's posts ordered by position
pub async fn list_collection_posts(
    pool: &AnyPool,
    collection_id: CollectionId,
) -> Result<Vec<CollectionPost>, CatalogueError> {
    #[derive(sqlx::FromRow)]
    struct MembershipRow {
        post_id: i64,
        title: String,
        position: i64,
    }

    let rows = sqlx::query_as::<_, MembershipRow>(
        r#"
        SELECT cp.post_id AS post_id, p.title AS title, cp.position AS position
        FROM collection_posts cp
        JOIN posts p ON p.id = cp.post_id
        WHERE cp.collection_id = $1
        ORDER BY cp.position ASC
        "#,
    )
    .bind(collection_id.0)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| CollectionPost {
            post_id: row.post_id,
            title: row.title,
            position: row.position,
        })
        .collect())
}
