//! # Router
//!
//! Builds the full application: routes, the auth guard, the activity middleware,
//! sessions, static assets, and request tracing.

use crate::handlers::{auth, health::health_check, movies, pages};
use crate::middleware::auth::{require_auth, track_activity};
use crate::state::AppState;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer, SessionStore};

/// Hours of inactivity before the session store itself forgets a session.
/// The application-level inactivity window is shorter and enforced by `track_activity`.
const SESSION_STORE_TTL_HOURS: i64 = 24;

/// Session layer over any `tower-sessions` store
pub fn session_layer<Store>(store: Store, secure: bool) -> SessionManagerLayer<Store>
where
    Store: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_expiry(Expiry::OnInactivity(Duration::hours(SESSION_STORE_TTL_HOURS)))
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(secure)
}

/// Build the application router
///
/// Layers run outside-in: tracing, sessions, activity tracking, then the per-route guard.
pub fn router<Store>(
    state: AppState,
    sessions: SessionManagerLayer<Store>,
    static_dir: &str,
) -> Router
where
    Store: SessionStore + Clone,
{
    // Mutating routes and their forms. Unauthenticated requests are redirected to
    // the login page before any handler runs.
    let protected_routes = Router::new()
        .route("/api/addmovie", get(pages::add_movie_form))
        .route("/api/movies", post(movies::create_movie))
        .route("/api/update/movies", get(pages::update_movie_form))
        .route("/api/movies/update", post(movies::update_movie))
        .route("/api/delete/movie", get(pages::delete_movie_form))
        .route("/api/movies/delete", post(movies::delete_movie))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(pages::welcome))
        // Catalog browsing
        .route("/api/moviesform", get(pages::search_form))
        .route("/api/movies", get(movies::list_movies))
        .route("/api/findmoviebyid", get(pages::find_by_id_form))
        .route("/api/onemovie", get(movies::show_movie))
        // Accounts
        .route("/register", get(auth::register_form))
        .route("/auth/register", post(auth::register))
        .route("/login", get(auth::login_form))
        .route("/auth/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .merge(protected_routes)
        .nest_service("/public", ServeDir::new(static_dir))
        .fallback(pages::not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            track_activity,
        ))
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
