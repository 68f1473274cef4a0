//! Client error taxonomy.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use thiserror::Error;

use crate::{client::envelope::ErrorBody, session::StoreError};

/// Errors surfaced by the storefront client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP 422: a validation failure the calling form layer must inspect.
    /// Passed through untouched, with the response envelope intact.
    #[error("validation failed")]
    Validation(ErrorBody),

    /// Any other unsuccessful HTTP status. Terminal: the session has been
    /// cleared by the time this error is returned.
    #[error("api request failed with status {status}")]
    Api {
        /// HTTP status of the failed response.
        status: StatusCode,

        /// Parsed error envelope.
        body: ErrorBody,
    },

    /// Transport-level failure (connection, timeout, malformed response).
    /// Terminal: the session has been cleared by the time this error is
    /// returned.
    #[error("transport error")]
    Transport(#[source] reqwest::Error),

    /// The session was invalidated by a concurrent failed refresh; the
    /// request was neither retried nor sent with a renewed credential.
    #[error("session invalidated")]
    SessionInvalidated,

    /// A successful response body did not match the expected shape.
    #[error("unexpected response body")]
    Decode(#[source] serde_json::Error),

    /// A request body could not be encoded as JSON.
    #[error("request body could not be encoded")]
    Encode(#[source] serde_json::Error),

    /// The configured base URL or a request path was invalid.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    /// Credential store failure during construction.
    #[error("credential store error")]
    Store(#[from] StoreError),
}

impl ClientError {
    /// Whether this is an HTTP 422 validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Per-field messages from a validation failure, empty otherwise.
    #[must_use]
    pub fn validation_messages(&self) -> BTreeMap<String, String> {
        match self {
            Self::Validation(body) => body.field_messages(),
            _ => BTreeMap::new(),
        }
    }
}
