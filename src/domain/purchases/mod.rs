//! Cart and purchases.

mod models;
mod service;

pub use models::{
    AddToCart, Purchase, PurchaseListStatus, PurchaseStatus, UnknownPurchaseStatus,
};
pub use service::{HttpPurchasesService, MockPurchasesService, PurchasesService};
