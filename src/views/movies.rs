//! Movie listing and detail pages.

use super::{escape_html, layout};
use crate::auth::session::CurrentUser;
use crate::db::models::Movie;
use crate::pagination::Listing;
use serde_json::Value;

/// Render a document value for display
///
/// Arrays are joined with ", "; nested objects fall back to compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn movie_fields(movie: &Movie) -> String {
    movie
        .document
        .iter()
        .map(|(key, value)| {
            format!(
                "    <dt>{}</dt><dd>{}</dd>",
                escape_html(key),
                escape_html(&display_value(value))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn movie_card(movie: &Movie) -> String {
    let id = escape_html(&movie.id);
    let title = escape_html(movie.title().unwrap_or("(untitled)"));
    format!(
        r#"<li class="movie" data-id="{id}">
  <h2><a href="/api/onemovie?id={id}">{title}</a></h2>
  <dl>
{}
  </dl>
</li>"#,
        movie_fields(movie)
    )
}

/// Link to a listing page, keeping the page size and title filter
fn page_href(page: i64, per_page: i64, title: Option<&str>) -> String {
    let page = page.to_string();
    let per_page = per_page.to_string();
    let mut params = vec![("page", page.as_str()), ("perPage", per_page.as_str())];
    if let Some(title) = title {
        params.push(("title", title));
    }

    // Encoding a list of string pairs cannot fail
    let query = serde_urlencoded::to_string(&params).unwrap_or_default();
    escape_html(&format!("/api/movies?{query}"))
}

fn pager(listing: &Listing) -> String {
    let info = &listing.info;
    let title = listing.title.as_deref();

    let mut links = Vec::new();
    if let Some(previous) = info.previous() {
        links.push(format!(
            r#"<a rel="prev" href="{}">Previous</a>"#,
            page_href(previous, info.per_page, title)
        ));
    }
    for page in 1..=info.total_pages {
        let class = if page == info.page { r#" class="current""# } else { "" };
        links.push(format!(
            r#"<a{class} href="{}">{page}</a>"#,
            page_href(page, info.per_page, title)
        ));
    }
    if let Some(next) = info.next() {
        links.push(format!(
            r#"<a rel="next" href="{}">Next</a>"#,
            page_href(next, info.per_page, title)
        ));
    }

    format!(r#"<nav class="pager">{}</nav>"#, links.join(" "))
}

/// The paginated movie listing
///
/// The pager is rendered only when the results span more than one page.
pub fn listing(listing: &Listing, viewer: Option<&CurrentUser>) -> String {
    let info = &listing.info;

    let heading = match listing.title.as_deref() {
        Some(title) => format!("Movies matching &quot;{}&quot;", escape_html(title)),
        None => "Movies".to_string(),
    };

    let items = if listing.movies.is_empty() {
        r#"<p class="empty">No movies on this page.</p>"#.to_string()
    } else {
        format!(
            "<ul class=\"movies\">\n{}\n</ul>",
            listing
                .movies
                .iter()
                .map(movie_card)
                .collect::<Vec<_>>()
                .join("\n")
        )
    };

    let pager = if info.has_multiple_pages {
        pager(listing)
    } else {
        String::new()
    };

    let body = format!(
        r#"<h1>{heading}</h1>
<p class="summary" data-page="{}" data-per-page="{}" data-total="{}" data-total-pages="{}">
  Page {} of {} ({} movies)
</p>
{items}
{pager}"#,
        info.page,
        info.per_page,
        info.total,
        info.total_pages,
        info.page,
        info.total_pages,
        info.total,
    );

    layout("Movies", viewer, &body)
}

/// A single movie with all of its fields
pub fn detail(movie: &Movie, viewer: Option<&CurrentUser>) -> String {
    let title = movie.title().unwrap_or("(untitled)");
    let body = format!(
        r#"<article class="movie" data-id="{}">
  <h1>{}</h1>
  <p>Id: <code>{}</code></p>
  <dl>
{}
  </dl>
</article>"#,
        escape_html(&movie.id),
        escape_html(title),
        escape_html(&movie.id),
        movie_fields(movie)
    );
    layout(title, viewer, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{PageRequest, Listing};
    use serde_json::json;
    use sqlx::types::Json;

    fn movie(id: &str, document: Value) -> Movie {
        let Value::Object(map) = document else {
            panic!("document must be an object")
        };
        Movie {
            id: id.to_string(),
            document: Json(map),
        }
    }

    fn request(page: i64, per_page: i64, title: Option<&str>) -> PageRequest {
        PageRequest {
            page,
            per_page,
            title: title.map(String::from),
        }
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!(["Drama", "Crime"])), "Drama, Crime");
        assert_eq!(display_value(&json!(1995)), "1995");
        assert_eq!(display_value(&json!(null)), "");
    }

    #[test]
    fn test_listing_escapes_document_content() {
        let listing = Listing::new(
            request(1, 10, None),
            1,
            vec![movie(
                "507f1f77bcf86cd799439011",
                json!({"title": "<i>Heat</i>", "genres": ["Crime"]}),
            )],
        );
        let html = super::listing(&listing, None);
        assert!(html.contains("&lt;i&gt;Heat&lt;/i&gt;"));
        assert!(!html.contains("<i>Heat</i>"));
        assert_eq!(html.matches(r#"<li class="movie""#).count(), 1);
    }

    #[test]
    fn test_pager_only_with_multiple_pages() {
        let single = Listing::new(request(1, 10, None), 3, vec![]);
        assert!(!super::listing(&single, None).contains("class=\"pager\""));

        let multi = Listing::new(request(2, 5, Some("the end")), 12, vec![]);
        let html = super::listing(&multi, None);
        assert!(html.contains("class=\"pager\""));
        assert!(html.contains(r#"data-total-pages="3""#));
        assert!(html.contains("/api/movies?page=3&amp;perPage=5&amp;title=the+end"));
        assert!(html.contains(r#"rel="prev""#));
        assert!(html.contains(r#"rel="next""#));
    }

    #[test]
    fn test_page_href_encodes_title() {
        assert_eq!(page_href(2, 5, None), "/api/movies?page=2&amp;perPage=5");
        assert_eq!(
            page_href(1, 10, Some("a b&c")),
            "/api/movies?page=1&amp;perPage=10&amp;title=a+b%26c"
        );
        assert_eq!(
            page_href(1, 10, Some("é")),
            "/api/movies?page=1&amp;perPage=10&amp;title=%C3%A9"
        );
    }

    #[test]
    fn test_detail_lists_fields() {
        let html = detail(
            &movie("507f1f77bcf86cd799439011", json!({"title": "Heat", "year": 1995})),
            None,
        );
        assert!(html.contains("<dt>year</dt><dd>1995</dd>"));
        assert!(html.contains("507f1f77bcf86cd799439011"));
    }
}
