//! # Authentication Form Types
//!
//! Request payloads for the registration and login forms.

use serde::Deserialize;

/// Username + password, posted as a form or as JSON
///
/// Missing fields deserialize to empty strings and are rejected by registration
/// and login validation.
#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
