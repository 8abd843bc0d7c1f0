//! # Middleware Module
//!
//! Middleware intercepts HTTP requests before they reach a handler.
//!
//! ## Our Middleware
//! - `auth::track_activity`: runs on every request; turns a live session into a
//!   request-scoped `CurrentUser` and ends sessions that sat idle too long
//! - `auth::require_auth`: guards the mutating routes
//!
//! Both need the `tower-sessions` layer to be installed outside them.

pub mod auth;
