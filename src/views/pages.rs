//! Static pages, forms, and outcome pages.

use super::{escape_html, layout};
use crate::auth::session::CurrentUser;

pub fn welcome(viewer: Option<&CurrentUser>) -> String {
    layout(
        "Welcome",
        viewer,
        r#"<h1>Welcome to the Movie Catalog</h1>
<p>Browse the <a href="/api/movies">movie list</a>, search by title, or look a movie up by its id.</p>"#,
    )
}

/// Listing search form: title filter plus paging controls
pub fn search_form(viewer: Option<&CurrentUser>) -> String {
    layout(
        "Search movies",
        viewer,
        r#"<h1>Search movies</h1>
<form method="get" action="/api/movies">
  <label>Title <input type="text" name="title"></label>
  <label>Page <input type="number" name="page" min="1" value="1"></label>
  <label>Per page <input type="number" name="perPage" min="1" value="10"></label>
  <button type="submit">Search</button>
</form>"#,
    )
}

pub fn find_by_id_form(viewer: Option<&CurrentUser>) -> String {
    layout(
        "Find a movie",
        viewer,
        r#"<h1>Find a movie by id</h1>
<form method="get" action="/api/onemovie">
  <label>Movie id <input type="text" name="id" required pattern="[0-9a-fA-F]{24}"></label>
  <button type="submit">Find</button>
</form>"#,
    )
}

/// Fields offered on the add and update forms. Any other field can be sent as JSON.
const MOVIE_FIELDS: [(&str, &str); 6] = [
    ("title", "Title"),
    ("year", "Year"),
    ("plot", "Plot"),
    ("genres", "Genres"),
    ("directors", "Directors"),
    ("runtime", "Runtime (minutes)"),
];

fn movie_inputs(required_title: bool) -> String {
    MOVIE_FIELDS
        .iter()
        .map(|(name, label)| {
            let required = if required_title && *name == "title" {
                " required"
            } else {
                ""
            };
            format!(r#"  <label>{label} <input type="text" name="{name}"{required}></label>"#)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn add_movie_form(viewer: Option<&CurrentUser>) -> String {
    let body = format!(
        r#"<h1>Add a movie</h1>
<form method="post" action="/api/movies">
{}
  <button type="submit">Add</button>
</form>"#,
        movie_inputs(true)
    );
    layout("Add a movie", viewer, &body)
}

pub fn update_movie_form(viewer: Option<&CurrentUser>) -> String {
    let body = format!(
        r#"<h1>Update a movie</h1>
<p>Blank fields are left unchanged.</p>
<form method="post" action="/api/movies/update">
  <label>Movie id <input type="text" name="id" required pattern="[0-9a-fA-F]{{24}}"></label>
{}
  <button type="submit">Update</button>
</form>"#,
        movie_inputs(false)
    );
    layout("Update a movie", viewer, &body)
}

pub fn delete_movie_form(viewer: Option<&CurrentUser>) -> String {
    layout(
        "Delete a movie",
        viewer,
        r#"<h1>Delete a movie</h1>
<form method="post" action="/api/movies/delete">
  <label>Movie id <input type="text" name="id" required pattern="[0-9a-fA-F]{24}"></label>
  <button type="submit">Delete</button>
</form>"#,
    )
}

pub fn register_form(viewer: Option<&CurrentUser>) -> String {
    layout(
        "Register",
        viewer,
        r#"<h1>Create an account</h1>
<form method="post" action="/auth/register">
  <label>Username <input type="text" name="username" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Register</button>
</form>"#,
    )
}

pub fn login_form(viewer: Option<&CurrentUser>) -> String {
    layout(
        "Login",
        viewer,
        r#"<h1>Log in</h1>
<form method="post" action="/auth/login">
  <label>Username <input type="text" name="username" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Log in</button>
</form>"#,
    )
}

/// Outcome page for a completed action, optionally naming the affected movie
pub fn success_page(viewer: Option<&CurrentUser>, action: &str, movie_id: Option<&str>) -> String {
    let movie = movie_id
        .map(|id| {
            let id = escape_html(id);
            format!(
                r#"
<p>Movie id: <a class="movie-id" href="/api/onemovie?id={id}">{id}</a></p>"#
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<h1 class="success">{} successfully!</h1>{movie}"#,
        escape_html(action)
    );
    layout("Success", viewer, &body)
}

/// Error page with a headline and optional hint
pub fn error_page(viewer: Option<&CurrentUser>, headline: &str, hint: Option<&str>) -> String {
    let hint = hint
        .map(|h| format!("\n<p>{}</p>", escape_html(h)))
        .unwrap_or_default();

    let body = format!(
        r#"<h1 class="error">{}</h1>{hint}
<p><a href="/">Back to the start</a></p>"#,
        escape_html(headline)
    );
    layout("Error", viewer, &body)
}
