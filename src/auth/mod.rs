//! # Authentication Module
//!
//! Username/password authentication backed by server-side sessions.
//!
//! ## Submodules
//! - `types`: Form payloads for registration and login
//! - `password`: bcrypt hashing and verification
//! - `token`: Signed login tokens and their cookie
//! - `session`: What the session stores about a logged-in user
//! - `registration`: Creating accounts
//! - `authentication`: Checking credentials at login
//!
//! ## Login Flow
//! 1. Client posts username + password → `authentication::authenticate()`
//! 2. Server looks the user up and verifies the bcrypt hash
//! 3. On success a token is signed and set as the `token` cookie
//! 4. The session id is rotated and the user is stored in the session
//! 5. Later requests are authenticated by the session (or a bearer token)

pub mod authentication;
pub mod password;
pub mod registration;
pub mod session;
pub mod token;
pub mod types;
