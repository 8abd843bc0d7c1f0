//! Custom Axum extractors.
//!
//! - `Viewer`: the logged-in user, if any, as set by the activity middleware
//! - `FieldsBody`: a movie document from either a form post or a JSON object
//! - `FormOrJson<T>`: a typed body from either a form post or JSON
//! - `QueryParams<T>`: a typed query string
//! - `ListQuery`: the listing query, with repeated keys kept for validation
//!
//! Rejections become `AppError`s, so malformed input gets the same error page (or,
//! for the listing, the same JSON error body) as any other failed request.

use crate::auth::session::CurrentUser;
use crate::db::models::Document;
use crate::error::{AppError, FieldError};
use crate::pagination::ListParams;
use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header, request::Parts},
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::convert::Infallible;

/// The user behind the current request, or `None` when anonymous
#[derive(Debug, Clone, Default)]
pub struct Viewer(pub Option<CurrentUser>);

impl Viewer {
    pub fn user(&self) -> Option<&CurrentUser> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<CurrentUser>().cloned()))
    }
}

/// Submitted movie fields
///
/// `application/json` bodies must be a JSON object and keep their value types.
/// Anything else is parsed as a url-encoded form; blank form values are dropped so
/// an untouched input on the update form leaves the stored field alone.
#[derive(Debug, Clone, Default)]
pub struct FieldsBody(pub Document);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| {
            let mime = ct.split(';').next().unwrap_or_default().trim();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

impl<S> FromRequest<S> for FieldsBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(fields) = Json::<Document>::from_request(req, state)
                .await
                .map_err(|e| {
                    tracing::debug!("rejected JSON body: {}", e.body_text());
                    AppError::BadRequest("Request body must be a JSON object".to_string())
                })?;
            return Ok(Self(fields));
        }

        let Form(fields) = Form::<BTreeMap<String, String>>::from_request(req, state)
            .await
            .map_err(|e| {
                tracing::debug!("rejected form body: {}", e.body_text());
                AppError::BadRequest("Malformed form submission".to_string())
            })?;

        Ok(Self(
            fields
                .into_iter()
                .filter(|(_, value)| !value.trim().is_empty())
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        ))
    }
}

/// A typed request body, posted either as a url-encoded form or as JSON
#[derive(Debug, Clone, Default)]
pub struct FormOrJson<T>(pub T);

impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
                tracing::debug!("rejected JSON body: {}", e.body_text());
                AppError::BadRequest("Malformed JSON body".to_string())
            })?;
            return Ok(Self(value));
        }

        let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!("rejected form body: {}", e.body_text());
            AppError::BadRequest("Malformed form submission".to_string())
        })?;
        Ok(Self(value))
    }
}

/// A typed query string; anything that fails to deserialize is a `BadRequest`
#[derive(Debug, Clone, Default)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!("rejected query string: {}", e.body_text());
                AppError::BadRequest("Malformed query string".to_string())
            })?;
        Ok(Self(value))
    }
}

/// Listing query parameters
///
/// Read as raw key/value pairs so a repeated `page` or `perPage` is reported as an
/// invalid field value instead of failing the whole query string.
#[derive(Debug, Default)]
pub struct ListQuery(pub ListParams);

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!("rejected listing query: {}", e.body_text());
                AppError::Validation(vec![FieldError::query(
                    "query",
                    parts.uri.query().unwrap_or_default(),
                )])
            })?;
        Ok(Self(ListParams::from_pairs(pairs)))
    }
}

impl FieldsBody {
    /// Remove and return the `id` field, as a string
    pub fn take_id(&mut self) -> String {
        match self.0.remove("id") {
            Some(Value::String(id)) => id.trim().to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::json;

    async fn extract(content_type: &str, body: &str) -> Result<FieldsBody, AppError> {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        FieldsBody::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_form_body_drops_blank_values() {
        let FieldsBody(fields) = extract(
            "application/x-www-form-urlencoded",
            "title=Heat&year=&plot=Cops+and+robbers",
        )
        .await
        .unwrap();

        assert_eq!(
            Value::Object(fields),
            json!({"title": "Heat", "plot": "Cops and robbers"})
        );
    }

    #[tokio::test]
    async fn test_json_body_keeps_types() {
        let FieldsBody(fields) = extract(
            "application/json; charset=utf-8",
            r#"{"title": "Heat", "year": 1995, "genres": ["Crime"]}"#,
        )
        .await
        .unwrap();

        assert_eq!(fields["year"], json!(1995));
        assert_eq!(fields["genres"], json!(["Crime"]));
    }

    #[tokio::test]
    async fn test_json_array_rejected() {
        let result = extract("application/json", "[1, 2]").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[derive(Debug, serde::Deserialize)]
    struct Login {
        username: String,
    }

    #[tokio::test]
    async fn test_form_or_json_accepts_both() {
        let req = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username": "alice"}"#))
            .unwrap();
        let FormOrJson(login) = FormOrJson::<Login>::from_request(req, &()).await.unwrap();
        assert_eq!(login.username, "alice");

        let req = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("username=bob"))
            .unwrap();
        let FormOrJson(login) = FormOrJson::<Login>::from_request(req, &()).await.unwrap();
        assert_eq!(login.username, "bob");
    }

    #[tokio::test]
    async fn test_form_or_json_rejection_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .body(Body::from("username=bob"))
            .unwrap();
        let result = FormOrJson::<Login>::from_request(req, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let req = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let result = FormOrJson::<Login>::from_request(req, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    fn query_parts(uri: &str) -> Parts {
        let (parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn test_query_params_duplicate_key_is_bad_request() {
        let mut parts = query_parts("/?username=a&username=b");
        let result = QueryParams::<Login>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_list_query_keeps_repeated_keys() {
        let mut parts = query_parts("/?page=1&page=2&perPage=5");
        let ListQuery(params) = ListQuery::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(params.page.as_deref(), Some("1,2"));
        assert_eq!(params.per_page.as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn test_take_id() {
        let mut body = extract(
            "application/x-www-form-urlencoded",
            "id=+507f1f77bcf86cd799439011+&title=Heat",
        )
        .await
        .unwrap();

        assert_eq!(body.take_id(), "507f1f77bcf86cd799439011");
        assert!(body.0.get("id").is_none());
        assert_eq!(body.take_id(), "");
    }
}
