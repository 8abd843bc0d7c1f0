//! # Health Check Handler
//!
//! Used by load balancers and monitoring systems.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// Health check endpoint
///
/// ## Route
/// GET /health
///
/// ## Response
/// 200 with `{"status": "healthy", ...}` when the database answers,
/// 503 with `{"status": "degraded", ...}` when it does not.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "service": "movie-catalog",
                "database": "up"
            })),
        ),
        Err(e) => {
            tracing::warn!("health check database probe failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "service": "movie-catalog",
                    "database": "down"
                })),
            )
        }
    }
}
