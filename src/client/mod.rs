//! Authenticated request pipeline and its wire types.

mod config;
mod envelope;
mod errors;
mod http;

pub use config::{AuthEndpoints, ClientConfig, DEFAULT_TIMEOUT};
pub use envelope::{ApiMessage, ApiSuccess, ErrorBody, ErrorData};
pub use errors::ClientError;
pub use http::StorefrontClient;
