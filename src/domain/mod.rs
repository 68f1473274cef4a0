//! Typed wrappers over the storefront API, one module per resource.

pub mod account;
pub mod auth;
pub mod categories;
pub mod products;
pub mod purchases;
