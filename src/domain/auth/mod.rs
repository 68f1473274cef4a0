//! Account lifecycle: registration, login, logout.

mod models;
mod service;

pub use models::{AuthPayload, Credentials};
pub use service::{AuthService, HttpAuthService, MockAuthService};
