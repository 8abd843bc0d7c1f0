use crate::db::models::User;
use crate::error::{AppError, AppResult};
use sqlx::SqlitePool;

/// Persist a new account
///
/// The `users.username` unique index turns a second registration of the same name
/// into `DuplicateUsername`.
pub async fn create_user(pool: &SqlitePool, username: &str, password_hash: &str) -> AppResult<User> {
    let user = User::new(username.to_string(), password_hash.to_string());

    sqlx::query(
        "INSERT INTO users (id, username, password_hash, created_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.created_at)
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::DuplicateUsername,
        _ => AppError::Database(e),
    })?;

    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound(format!("User '{}' not found", username)),
            _ => AppError::Database(e),
        })?;

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, user_id: &str) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound(format!("User with id '{}' not found", user_id)),
            _ => AppError::Database(e),
        })?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let created = create_user(&pool, "alice", "hash").await.unwrap();

        let by_name = find_by_username(&pool, "alice").await.unwrap();
        assert_eq!(by_name.id, created.id);
        assert_eq!(by_name.password_hash, "hash");

        let by_id = find_by_id(&pool, &created.id).await.unwrap();
        assert_eq!(by_id.username, "alice");
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let pool = test_pool().await;
        create_user(&pool, "alice", "hash").await.unwrap();

        let second = create_user(&pool, "alice", "other").await;
        assert!(matches!(second, Err(AppError::DuplicateUsername)));
    }

    #[tokio::test]
    async fn test_unknown_user_not_found() {
        let pool = test_pool().await;
        assert!(matches!(
            find_by_username(&pool, "ghost").await,
            Err(AppError::NotFound(_))
        ));
    }
}
