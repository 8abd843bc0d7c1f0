//! # Error Handling
//!
//! This module defines the application error type and converts it into HTTP responses.
//!
//! Most errors become a rendered error page; the listing API's query validation is
//! the exception and answers with a structured JSON body so clients can see every
//! failing field at once.
//!
//! Messages shown to users never carry internal details. Storage, session, hashing and
//! token failures are logged in full and rendered with a generic message.

use crate::views;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// One failing field in a validated request
///
/// Serialized in the shape `{"type","value","msg","path","location"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: String,
    pub msg: String,
    pub path: String,
    pub location: &'static str,
}

impl FieldError {
    /// A query-string field that failed validation
    pub fn query(path: &str, value: &str) -> Self {
        Self {
            kind: "field",
            value: value.to_string(),
            msg: "Invalid value".to_string(),
            path: path.to_string(),
            location: "query",
        }
    }
}

/// Application-wide error type
///
/// Each variant corresponds to a category of failure with its own status code.
/// `#[from]` conversions let the `?` operator lift library errors into `AppError`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Query parameters failed validation (400, JSON body listing every field)
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Malformed form input (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A movie identifier that is not 24 hexadecimal characters (400)
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// No record matched (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Login failed. Deliberately does not say whether the user exists (401)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration hit the unique index on usernames (409)
    #[error("Username already taken")]
    DuplicateUsername,

    /// Storage errors (SQLx library errors)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Session store errors
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// bcrypt hashing/verification failures
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Token signing failures
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unexpected failures (blocking task panics, impossible states)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::InvalidIdentifier(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::DuplicateUsername => StatusCode::CONFLICT,
            AppError::Database(_)
            | AppError::Session(_)
            | AppError::PasswordHash(_)
            | AppError::Token(_)
            | AppError::Serialization(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Headline and hint rendered on the error page
    ///
    /// Server-side failures collapse to a generic headline; the detail stays in the logs.
    fn page_text(&self) -> (String, Option<&'static str>) {
        match self {
            AppError::BadRequest(msg) => (msg.clone(), Some("Try Again!!")),
            AppError::InvalidIdentifier(_) => {
                ("Invalid movieId format".to_string(), Some("Try Again!!"))
            }
            AppError::NotFound(msg) => (msg.clone(), Some("Try something else :)!!")),
            AppError::InvalidCredentials => ("Invalid credentials".to_string(), None),
            AppError::DuplicateUsername => (
                "That username is already taken".to_string(),
                Some("Pick another one"),
            ),
            AppError::Validation(errors) => (
                format!("{} invalid field(s)", errors.len()),
                Some("Try Again!!"),
            ),
            _ => ("Internal Server Error".to_string(), None),
        }
    }
}

/// Convert AppError into an HTTP response
///
/// 1. Log the error (server faults at error level, client faults at debug)
/// 2. Pick the status code
/// 3. Render JSON for validation failures, an HTML error page for everything else
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        if let AppError::Validation(errors) = self {
            return (status, Json(json!({ "errors": errors }))).into_response();
        }

        // Built without the request, so the page is rendered for an anonymous viewer
        let (headline, hint) = self.page_text();
        (status, Html(views::pages::error_page(None, &headline, hint))).into_response()
    }
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Validation(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidIdentifier("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::DuplicateUsername.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_not_rendered() {
        let err = AppError::Internal("connection refused at 10.0.0.3".into());
        let (headline, _) = err.page_text();
        assert_eq!(headline, "Internal Server Error");
    }

    #[test]
    fn test_field_error_shape() {
        let value = serde_json::to_value(FieldError::query("page", "abc")).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "field",
                "value": "abc",
                "msg": "Invalid value",
                "path": "page",
                "location": "query"
            })
        );
    }
}
