//! # Listing Pagination
//!
//! Validates the listing query (`page`, `perPage`, `title`) and derives the page
//! metadata shown alongside the results. Everything here is computed per request.

use crate::db::models::Movie;
use crate::error::{AppError, AppResult, FieldError};
use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Raw listing query parameters, exactly as received
#[derive(Debug, Default)]
pub struct ListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub title: Option<String>,
}

impl ListParams {
    /// Collect query pairs; a repeated key keeps every value, joined with `,`
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "perPage" => &mut params.per_page,
                "title" => &mut params.title,
                _ => continue,
            };
            *slot = Some(match slot.take() {
                Some(existing) => format!("{existing},{value}"),
                None => value,
            });
        }
        params
    }
}

/// A validated listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
    pub title: Option<String>,
}

impl PageRequest {
    /// Validate and coerce raw parameters
    ///
    /// - An absent or empty `page`/`perPage` takes its default
    /// - A non-integer value fails validation; every failing field is reported
    /// - Integers below 1 are coerced to the default
    /// - `title` is trimmed and dropped when blank
    pub fn from_params(params: &ListParams) -> AppResult<Self> {
        let mut errors = Vec::new();

        let page = parse_positive("page", params.page.as_deref(), &mut errors);
        let per_page = parse_positive("perPage", params.per_page.as_deref(), &mut errors);

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let title = params
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(Self {
            page: page.unwrap_or(DEFAULT_PAGE),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE),
            title,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

fn parse_positive(path: &str, raw: Option<&str>, errors: &mut Vec<FieldError>) -> Option<i64> {
    let raw = raw.filter(|r| !r.is_empty())?;
    match raw.parse::<i64>() {
        Ok(n) if n >= 1 => Some(n),
        Ok(_) => None,
        Err(_) => {
            errors.push(FieldError::query(path, raw));
            None
        }
    }
}

/// Number of pages needed for `total` records
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 0;
    }
    total / per_page + i64::from(total % per_page != 0)
}

/// Page metadata for a listing response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_multiple_pages: bool,
}

impl PageInfo {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = total_pages(total, per_page);
        Self {
            page,
            per_page,
            total,
            total_pages,
            has_multiple_pages: total_pages > 1,
        }
    }

    pub fn previous(&self) -> Option<i64> {
        (self.page > 1).then(|| (self.page - 1).min(self.total_pages.max(1)))
    }

    pub fn next(&self) -> Option<i64> {
        (self.page < self.total_pages).then_some(self.page + 1)
    }
}

/// View model for the movie listing page
#[derive(Debug, Clone)]
pub struct Listing {
    pub info: PageInfo,
    pub title: Option<String>,
    pub movies: Vec<Movie>,
}

impl Listing {
    pub fn new(request: PageRequest, total: i64, movies: Vec<Movie>) -> Self {
        Self {
            info: PageInfo::new(request.page, request.per_page, total),
            title: request.title,
            movies,
        }
    }
}
