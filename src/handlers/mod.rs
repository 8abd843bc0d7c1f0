//! # HTTP Request Handlers
//!
//! Each handler processes one route.
//!
//! ## Submodules
//! - `health`: Liveness probe
//! - `pages`: Welcome page, forms, and the not-found fallback
//! - `movies`: Listing, lookup, and the create/update/delete actions
//! - `auth`: Registration, login, logout
//!
//! ## Handler Pattern
//! 1. Extract data from the request (query, form/JSON body, session, viewer)
//! 2. Validate and call the data access or auth layer
//! 3. Render a view, or redirect

pub mod auth;
pub mod health;
pub mod movies;
pub mod pages;
