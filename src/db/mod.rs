//! # Database Module
//!
//! This module organizes all database-related code into submodules:
//! - `models`: Data structures (Movie, User) and the object identifier
//! - `movies`: CRUD operations for the movie collection
//! - `users`: Account storage and lookup
//!
//! Tables are created by the embedded migrations under `./migrations`.

pub mod models;
pub mod movies;
pub mod users;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Connect to the database and bring the schema up to date
///
/// Failure here is fatal: the server cannot start without its store.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let pool = SqlitePool::connect(database_url)
        .await
        .with_context(|| format!("failed to connect to database at {database_url}"))?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Run the embedded migrations
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("failed to run database migrations")?;
    Ok(())
}

/// Single-connection in-memory database with the schema applied
///
/// An in-memory SQLite database lives only as long as its connection, so the pool
/// is pinned to one connection that never idles out.
pub async fn memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .context("failed to open in-memory database")?;

    migrate(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    memory_pool().await.expect("in-memory database")
}
