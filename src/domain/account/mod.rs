//! Account management.

mod models;
mod service;

pub use models::{Role, UpdateProfileBody, User};
pub use service::{AccountService, HttpAccountService, MockAccountService};
