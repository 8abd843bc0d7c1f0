//! Handlers that only render a page.

use crate::extractors::Viewer;
use crate::views;
use axum::{http::StatusCode, response::Html};

pub async fn welcome(viewer: Viewer) -> Html<String> {
    Html(views::pages::welcome(viewer.user()))
}

pub async fn search_form(viewer: Viewer) -> Html<String> {
    Html(views::pages::search_form(viewer.user()))
}

pub async fn find_by_id_form(viewer: Viewer) -> Html<String> {
    Html(views::pages::find_by_id_form(viewer.user()))
}

pub async fn add_movie_form(viewer: Viewer) -> Html<String> {
    Html(views::pages::add_movie_form(viewer.user()))
}

pub async fn update_movie_form(viewer: Viewer) -> Html<String> {
    Html(views::pages::update_movie_form(viewer.user()))
}

pub async fn delete_movie_form(viewer: Viewer) -> Html<String> {
    Html(views::pages::delete_movie_form(viewer.user()))
}

/// Catch-all for unknown routes
pub async fn not_found(viewer: Viewer) -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(views::pages::error_page(
            viewer.user(),
            "Oops! I think you are lost!!",
            Some("I hope you find your way out :)"),
        )),
    )
}
