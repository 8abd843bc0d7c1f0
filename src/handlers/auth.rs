use crate::auth::session;
use crate::auth::types::CredentialsForm;
use crate::auth::{authentication, registration};
use crate::error::AppResult;
use crate::extractors::{FormOrJson, Viewer};
use crate::state::AppState;
use crate::views;
use axum::{
    extract::State,
    http::header,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Landing page after login and logout
pub const LISTING_PATH: &str = "/api/movies";

// Registration endpoints

pub async fn register_form(viewer: Viewer) -> Html<String> {
    Html(views::pages::register_form(viewer.user()))
}

pub async fn register(
    State(state): State<AppState>,
    viewer: Viewer,
    FormOrJson(form): FormOrJson<CredentialsForm>,
) -> AppResult<Html<String>> {
    registration::register_user(&state, &form.username, &form.password).await?;

    Ok(Html(views::pages::success_page(
        viewer.user(),
        "User Registration",
        None,
    )))
}

// Login / logout endpoints

pub async fn login_form(viewer: Viewer) -> Html<String> {
    Html(views::pages::login_form(viewer.user()))
}

/// Check credentials, then open a session and set the token cookie
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    FormOrJson(form): FormOrJson<CredentialsForm>,
) -> AppResult<Response> {
    let user = authentication::authenticate(&state, &form.username, &form.password).await?;

    let token = state.tokens.issue(&user.id, &user.username)?;
    session::establish(&session, &user).await?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, state.tokens.cookie(&token))]),
        Redirect::to(LISTING_PATH),
    )
        .into_response())
}

pub async fn logout(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    session::destroy(&session).await?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, state.tokens.clear_cookie())]),
        Redirect::to(LISTING_PATH),
    )
        .into_response())
}
