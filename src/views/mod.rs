//! # Views
//!
//! Server-side HTML rendering. Handlers build a view model and call one of the
//! functions here; every interpolated value goes through [`escape_html`].
//!
//! - `pages`: welcome page, forms, success and error pages
//! - `movies`: listing and single-movie pages

pub mod movies;
pub mod pages;

use crate::auth::session::CurrentUser;

/// Escape special HTML characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap page content in the shared document layout
///
/// Navigation shows the mutation links and a logout link only to logged-in users.
pub fn layout(title: &str, viewer: Option<&CurrentUser>, body: &str) -> String {
    let account = match viewer {
        Some(user) => format!(
            r#"<a href="/api/addmovie">Add</a>
      <a href="/api/update/movies">Update</a>
      <a href="/api/delete/movie">Delete</a>
      <span class="viewer">Signed in as {}</span>
      <a href="/logout">Logout</a>"#,
            escape_html(&user.username)
        ),
        None => r#"<a href="/login">Login</a>
      <a href="/register">Register</a>"#
            .to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} | Movie Catalog</title>
  <link rel="stylesheet" href="/public/styles.css">
</head>
<body>
  <header>
    <nav>
      <a href="/">Home</a>
      <a href="/api/movies">Movies</a>
      <a href="/api/moviesform">Search</a>
      <a href="/api/findmoviebyid">Find by id</a>
      {account}
    </nav>
  </header>
  <main>
{body}
  </main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_layout_navigation_follows_login_state() {
        let anonymous = layout("Home", None, "");
        assert!(anonymous.contains(r#"href="/login""#));
        assert!(!anonymous.contains(r#"href="/logout""#));

        let user = CurrentUser {
            user_id: "id".into(),
            username: "<alice>".into(),
        };
        let signed_in = layout("Home", Some(&user), "");
        assert!(signed_in.contains(r#"href="/logout""#));
        assert!(signed_in.contains("Signed in as &lt;alice&gt;"));
    }
}
