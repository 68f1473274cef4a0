//! Client configuration.

use std::time::Duration;

/// Default request timeout applied to every call, refreshes and retries
/// included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for connecting to a storefront API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base address, e.g. `"https://api.example.com"`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Paths of the auth-sensitive endpoints.
    pub endpoints: AuthEndpoints,
}

impl ClientConfig {
    /// Configuration with the default timeout and endpoint paths.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            endpoints: AuthEndpoints::default(),
        }
    }
}

/// Paths of the endpoints the client treats specially.
///
/// Matching is by exact path comparison against the request's configured
/// path, so the client carries no routing constants of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEndpoints {
    /// Login endpoint; a successful response carries a fresh session.
    pub login: String,

    /// Registration endpoint; a successful response carries a fresh session.
    pub register: String,

    /// Logout endpoint; a successful response tears the session down.
    pub logout: String,

    /// Token refresh endpoint; excluded from expiry detection so a refresh
    /// failure can never trigger a nested refresh.
    pub refresh: String,
}

impl Default for AuthEndpoints {
    fn default() -> Self {
        Self {
            login: "/login".to_owned(),
            register: "/register".to_owned(),
            logout: "/logout".to_owned(),
            refresh: "/refresh-access-token".to_owned(),
        }
    }
}
