/**
 * Collection Resolver
 *
 * Maps the slug used in URLs to the numeric key used by the membership
 * table. A miss is a normal outcome reported to the caller, not retried.
 */
use sqlx::AnyPool;

use crate::backend::catalogue::{CatalogueError, CollectionId};

/// Resolve a collection slug to its internal id
///
/// # Errors
///
/// * `CollectionNotFound` - no collection has this slug (an empty slug never
///   reaches the database)
/// * `Persistence` - the lookup itself failed
pub async fn resolve_collection(pool: &AnyPool, slug: &str) -> Result<CollectionId, CatalogueError> {
    if slug.is_empty() {
        return Err(CatalogueError::CollectionNotFound(String::new()));
    }

    let id: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT id
        FROM collections
        WHERE slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    match id {
        Some(id) => {
            tracing::debug!("Resolved collection '{}' to {}", slug, id);
            Ok(CollectionId(id))
        }
        None => Err(CatalogueError::CollectionNotFound(slug.to_string())),
    }
}
