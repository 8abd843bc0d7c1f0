//! # Movie Database Operations
//!
//! CRUD operations over the `movies` collection. Every operation that takes an
//! identifier validates it before the store is touched, so malformed ids surface as
//! `InvalidIdentifier` rather than as a lookup miss.
//!
//! ## Title filter
//! Listings filter with a case-insensitive (ASCII) substring match on the document's
//! `title`. `%` and `_` in the filter match themselves.

use crate::db::models::{sanitize_fields, Document, Movie, ObjectId};
use crate::error::AppResult;
use sqlx::types::Json;
use sqlx::SqlitePool;

/// Build the LIKE pattern for a title filter
///
/// Returns `None` for a missing or blank filter, meaning "match everything".
fn title_pattern(title: Option<&str>) -> Option<String> {
    let title = title.map(str::trim).filter(|t| !t.is_empty())?;
    let escaped = title
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}

/// Total number of movies in the collection
pub async fn count(pool: &SqlitePool) -> AppResult<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
        .fetch_one(pool)
        .await?;

    Ok(total)
}

/// Number of movies whose title matches the filter
pub async fn count_matching(pool: &SqlitePool, title: Option<&str>) -> AppResult<i64> {
    let Some(pattern) = title_pattern(title) else {
        return count(pool).await;
    };

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM movies WHERE title LIKE ? ESCAPE '\\'")
            .bind(pattern)
            .fetch_one(pool)
            .await?;

    Ok(total)
}

/// One page of movies in creation order
///
/// `page` and `per_page` are 1-based and positive; a page past the end is empty.
pub async fn list(
    pool: &SqlitePool,
    page: i64,
    per_page: i64,
    title: Option<&str>,
) -> AppResult<Vec<Movie>> {
    let offset = (page.max(1) - 1).saturating_mul(per_page);

    let movies = match title_pattern(title) {
        Some(pattern) => {
            sqlx::query_as::<_, Movie>(
                "SELECT id, document FROM movies
                 WHERE title LIKE ? ESCAPE '\\'
                 ORDER BY id
                 LIMIT ? OFFSET ?",
            )
            .bind(pattern)
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Movie>(
                "SELECT id, document FROM movies ORDER BY id LIMIT ? OFFSET ?",
            )
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(movies)
}

/// Look up one movie
///
/// `Ok(None)` means the id was well-formed but nothing matched.
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> AppResult<Option<Movie>> {
    let id = ObjectId::parse(id)?;

    let movie = sqlx::query_as::<_, Movie>("SELECT id, document FROM movies WHERE id = ?")
        .bind(id.to_hex())
        .fetch_optional(pool)
        .await?;

    Ok(movie)
}

/// Insert a new movie and return its freshly assigned identifier
pub async fn insert(pool: &SqlitePool, fields: Document) -> AppResult<ObjectId> {
    let id = ObjectId::new();
    let document = Json(sanitize_fields(fields));

    sqlx::query("INSERT INTO movies (id, document) VALUES (?, ?)")
        .bind(id.to_hex())
        .bind(document)
        .execute(pool)
        .await?;

    Ok(id)
}

/// Merge `fields` into an existing movie
///
/// Uses a JSON merge patch, so unspecified fields are kept and a JSON `null`
/// removes a field. Returns the updated movie, or `None` when the id is unknown.
pub async fn update_by_id(
    pool: &SqlitePool,
    id: &str,
    fields: Document,
) -> AppResult<Option<Movie>> {
    let id = ObjectId::parse(id)?;
    let patch = Json(sanitize_fields(fields));

    let movie = sqlx::query_as::<_, Movie>(
        "UPDATE movies SET document = json_patch(document, ?)
         WHERE id = ?
         RETURNING id, document",
    )
    .bind(patch)
    .bind(id.to_hex())
    .fetch_optional(pool)
    .await?;

    Ok(movie)
}

/// Delete a movie, reporting whether a record was removed
pub async fn delete_by_id(pool: &SqlitePool, id: &str) -> AppResult<bool> {
    let id = ObjectId::parse(id)?;

    let result = sqlx::query("DELETE FROM movies WHERE id = ?")
        .bind(id.to_hex())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
