//! Client SDK for the bazaar storefront API.
//!
//! The heart of the crate is [`client::StorefrontClient`], an authenticated
//! request pipeline that owns the access/refresh token pair, recovers
//! transparently from access-token expiry, and keeps a persistent credential
//! store in sync with login, logout and refresh events. The [`domain`]
//! modules layer typed endpoint wrappers on top of it.

pub mod client;
pub mod context;
pub mod domain;
pub mod session;
