//! # Movie Catalog
//!
//! A server-rendered movie catalog: paginated listing, lookup by id, and
//! session-authenticated create/update/delete over a document-style store.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod state;
pub mod views;
