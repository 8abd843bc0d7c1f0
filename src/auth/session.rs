//! # Session Data
//!
//! What a session remembers about a logged-in user, and how sessions are opened and
//! closed. The session itself is managed by `tower-sessions`; this module only decides
//! what goes in it.

use crate::db::models::User;
use crate::error::AppResult;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Key under which the logged-in user is stored in the session
pub const SESSION_USER_KEY: &str = "user";

/// Session payload for an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: String,
    pub username: String,
    /// Last request time, milliseconds since the Unix epoch
    pub last_activity: i64,
}

impl SessionUser {
    pub fn new(user_id: String, username: String, now_ms: i64) -> Self {
        Self {
            user_id,
            username,
            last_activity: now_ms,
        }
    }

    /// Whether more than `inactivity` has passed since the last request
    pub fn is_expired(&self, now_ms: i64, inactivity: Duration) -> bool {
        now_ms.saturating_sub(self.last_activity) > inactivity.num_milliseconds()
    }

    /// Request-scoped identity derived from this session
    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
        }
    }
}

/// Identity of the user making the current request
///
/// Inserted into request extensions by the activity middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: String,
    pub username: String,
}

/// Start an authenticated session for `user`
///
/// The session id is rotated first so an id handed out before login cannot be reused.
pub async fn establish(session: &Session, user: &User) -> AppResult<()> {
    session.cycle_id().await?;

    let payload = SessionUser::new(
        user.id.clone(),
        user.username.clone(),
        Utc::now().timestamp_millis(),
    );
    session.insert(SESSION_USER_KEY, payload).await?;

    Ok(())
}

/// Destroy the session and everything in it
pub async fn destroy(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_threshold() {
        let hour = Duration::hours(1);
        let user = SessionUser::new("id".into(), "alice".into(), 1_000_000);

        assert!(!user.is_expired(1_000_000, hour));
        assert!(!user.is_expired(1_000_000 + 3_600_000, hour));
        assert!(user.is_expired(1_000_000 + 3_600_001, hour));
    }

    #[test]
    fn test_clock_going_backwards_is_not_expiry() {
        let user = SessionUser::new("id".into(), "alice".into(), 1_000_000);
        assert!(!user.is_expired(0, Duration::hours(1)));
    }

    #[test]
    fn test_current_user() {
        let user = SessionUser::new("id".into(), "alice".into(), 0);
        assert_eq!(
            user.current_user(),
            CurrentUser {
                user_id: "id".into(),
                username: "alice".into()
            }
        );
    }
}
