//! Auth models.

use serde::{Deserialize, Serialize};

use crate::domain::account::User;

/// E-mail/password pair used by both login and registration.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Login identifier.
    pub email: String,

    /// Plain-text password; sent over TLS, never stored.
    pub password: String,
}

/// Payload of a successful login or registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    /// Short-lived token authorizing API calls.
    pub access_token: String,

    /// Access token lifetime in seconds.
    pub expires: i64,

    /// Longer-lived token used solely to mint new access tokens.
    pub refresh_token: String,

    /// Refresh token lifetime in seconds.
    pub expires_refresh_token: i64,

    /// Account the tokens belong to.
    pub user: User,
}
