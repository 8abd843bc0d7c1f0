//! # Credential Check
//!
//! Verifies a username/password pair. Both failure modes (unknown user, wrong
//! password) produce the same `InvalidCredentials` error.

use crate::auth::password;
use crate::db::models::User;
use crate::db::users;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticate a user, returning the account on success
pub async fn authenticate(state: &AppState, username: &str, password: &str) -> AppResult<User> {
    let user = match users::find_by_username(&state.db, username.trim()).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => {
            tracing::debug!(%username, "login for unknown user");
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => return Err(e),
    };

    if !password::verify_password(password, &user.password_hash).await? {
        tracing::debug!(%username, "login with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::registration::register_user;
    use crate::state::test_state;

    #[tokio::test]
    async fn test_correct_password() {
        let state = test_state().await;
        let registered = register_user(&state, "alice", "p").await.unwrap();

        let user = authenticate(&state, "alice", "p").await.unwrap();
        assert_eq!(user.id, registered.id);
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let state = test_state().await;
        register_user(&state, "alice", "p").await.unwrap();

        let wrong_password = authenticate(&state, "alice", "nope").await.unwrap_err();
        let unknown_user = authenticate(&state, "bob", "p").await.unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_user, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }
}
