//! # Account Registration
//!
//! Creates a user from a username and plaintext password. The password is hashed
//! with bcrypt before anything is stored; the plaintext never leaves this function.

use crate::auth::password;
use crate::db::models::User;
use crate::db::users;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Upper bound on username length
pub const MAX_USERNAME_LEN: usize = 64;

/// Register a new account
///
/// ## Flow
/// 1. Validate the username (trimmed, non-empty, bounded) and password (non-empty)
/// 2. Hash the password at the configured bcrypt cost
/// 3. Insert the user; the unique index rejects a taken username
///
/// ## Errors
/// - BadRequest: missing or oversized fields
/// - DuplicateUsername: the username already exists
/// - Database / PasswordHash: storage or hashing failed
pub async fn register_user(state: &AppState, username: &str, password: &str) -> AppResult<User> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::BadRequest(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }

    let hash = password::hash_password(password, state.bcrypt_cost).await?;
    let user = users::create_user(&state.db, username, &hash).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "registered new user");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    #[tokio::test]
    async fn test_register_hashes_password() {
        let state = test_state().await;
        let user = register_user(&state, "  alice ", "p").await.unwrap();

        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "p");
        assert!(user.password_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let state = test_state().await;
        assert!(matches!(
            register_user(&state, "   ", "p").await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            register_user(&state, "alice", "").await,
            Err(AppError::BadRequest(_))
        ));
        let long = "x".repeat(MAX_USERNAME_LEN + 1);
        assert!(matches!(
            register_user(&state, &long, "p").await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_register_twice_is_duplicate() {
        let state = test_state().await;
        register_user(&state, "alice", "p").await.unwrap();
        assert!(matches!(
            register_user(&state, "alice", "q").await,
            Err(AppError::DuplicateUsername)
        ));
    }
}
