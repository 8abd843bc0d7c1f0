//! # Movie Handlers
//!
//! Listing and lookup are public. Create, update and delete sit behind the
//! `require_auth` guard, so by the time they run the request is authenticated.

use crate::db::movies;
use crate::error::{AppError, AppResult};
use crate::extractors::{FieldsBody, ListQuery, QueryParams, Viewer};
use crate::pagination::{Listing, PageRequest};
use crate::state::AppState;
use crate::views;
use axum::{
    extract::State,
    response::Html,
};
use serde::Deserialize;

/// Paginated, optionally title-filtered listing
///
/// ## Route
/// GET /api/movies?page=&perPage=&title=
///
/// Non-integer or repeated `page`/`perPage` answer 400 with a JSON list of failing fields.
pub async fn list_movies(
    State(state): State<AppState>,
    viewer: Viewer,
    ListQuery(params): ListQuery,
) -> AppResult<Html<String>> {
    let request = PageRequest::from_params(&params)?;

    let total = movies::count_matching(&state.db, request.title()).await?;
    let items = movies::list(&state.db, request.page, request.per_page, request.title()).await?;
    tracing::debug!(
        page = request.page,
        per_page = request.per_page,
        total,
        returned = items.len(),
        "listed movies"
    );

    let listing = Listing::new(request, total, items);
    Ok(Html(views::movies::listing(&listing, viewer.user())))
}

#[derive(Debug, Default, Deserialize)]
pub struct MovieIdQuery {
    #[serde(default)]
    pub id: String,
}

/// Single movie lookup
///
/// ## Route
/// GET /api/onemovie?id=<24 hex characters>
pub async fn show_movie(
    State(state): State<AppState>,
    viewer: Viewer,
    QueryParams(query): QueryParams<MovieIdQuery>,
) -> AppResult<Html<String>> {
    let movie = movies::find_by_id(&state.db, query.id.trim())
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    Ok(Html(views::movies::detail(&movie, viewer.user())))
}

/// Create a movie from the submitted fields
///
/// ## Route
/// POST /api/movies (authenticated)
pub async fn create_movie(
    State(state): State<AppState>,
    viewer: Viewer,
    FieldsBody(fields): FieldsBody,
) -> AppResult<Html<String>> {
    let fields = crate::db::models::sanitize_fields(fields);
    if fields.is_empty() {
        return Err(AppError::BadRequest(
            "A movie needs at least one field".to_string(),
        ));
    }

    let id = movies::insert(&state.db, fields).await?;
    tracing::info!(movie_id = %id, "movie added");

    Ok(Html(views::pages::success_page(
        viewer.user(),
        "Added",
        Some(&id.to_hex()),
    )))
}

/// Merge submitted fields into an existing movie
///
/// ## Route
/// POST /api/movies/update (authenticated), body includes `id`
pub async fn update_movie(
    State(state): State<AppState>,
    viewer: Viewer,
    mut body: FieldsBody,
) -> AppResult<Html<String>> {
    let id = body.take_id();

    let movie = movies::update_by_id(&state.db, &id, body.0)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;
    tracing::info!(movie_id = %movie.id, "movie updated");

    Ok(Html(views::pages::success_page(
        viewer.user(),
        "Updated",
        Some(&movie.id),
    )))
}

/// Delete a movie
///
/// ## Route
/// POST /api/movies/delete (authenticated), body includes `id`
///
/// An unknown id is reported as not found on every call.
pub async fn delete_movie(
    State(state): State<AppState>,
    viewer: Viewer,
    mut body: FieldsBody,
) -> AppResult<Html<String>> {
    let id = body.take_id();

    if !movies::delete_by_id(&state.db, &id).await? {
        return Err(AppError::NotFound("Movie not found".to_string()));
    }
    tracing::info!(movie_id = %id, "movie deleted");

    Ok(Html(views::pages::success_page(
        viewer.user(),
        &format!("Deleted movie {id}"),
        None,
    )))
}
