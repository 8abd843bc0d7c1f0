use crate::auth::session::{self, CurrentUser, SessionUser, SESSION_USER_KEY};
use crate::auth::token::bearer_token;
use crate::db::users;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tower_sessions::Session;

/// Where unauthenticated and timed-out requests are sent
pub const LOGIN_PATH: &str = "/login";

/// Derive the request's identity from its session
///
/// - No user in the session: the request continues anonymously
/// - Idle longer than the inactivity window, or the account no longer exists: the
///   session is destroyed, the token cookie cleared, and the client redirected to the
///   login page, whatever the route
/// - Otherwise the last-activity time is refreshed and `CurrentUser` is attached to
///   the request extensions
pub async fn track_activity(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let stored: Option<SessionUser> = session.get(SESSION_USER_KEY).await?;

    if let Some(mut user) = stored {
        let now = Utc::now().timestamp_millis();

        if user.is_expired(now, state.session_inactivity) {
            tracing::info!(username = %user.username, "session expired after inactivity");
            return end_session(&state, &session).await;
        }

        let account = match users::find_by_id(&state.db, &user.user_id).await {
            Ok(account) => account,
            Err(AppError::NotFound(_)) => {
                tracing::info!(user_id = %user.user_id, "session user no longer exists");
                return end_session(&state, &session).await;
            }
            Err(e) => return Err(e),
        };

        user.username = account.username;
        user.last_activity = now;
        session.insert(SESSION_USER_KEY, &user).await?;
        request.extensions_mut().insert(user.current_user());
    }

    Ok(next.run(request).await)
}

/// Destroy the session, clear the token cookie, and send the client to log in
async fn end_session(state: &AppState, session: &Session) -> Result<Response, AppError> {
    session::destroy(session).await?;
    Ok((
        AppendHeaders([(header::SET_COOKIE, state.tokens.clear_cookie())]),
        Redirect::to(LOGIN_PATH),
    )
        .into_response())
}

/// Route guard for mutating routes
///
/// Passes requests that carry a session identity or a valid bearer token; everything
/// else is redirected to the login page without reaching the handler.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.extensions().get::<CurrentUser>().is_some() {
        return next.run(request).await;
    }

    let claims = bearer_token(request.headers()).and_then(|token| state.tokens.verify(token).ok());
    if let Some(claims) = claims {
        request.extensions_mut().insert(CurrentUser {
            user_id: claims.sub,
            username: claims.username,
        });
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), "unauthenticated request redirected to login");
    Redirect::to(LOGIN_PATH).into_response()
}
