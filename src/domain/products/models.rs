//! Product models.

use jiff::Timestamp;
use serde::Deserialize;

use crate::domain::categories::Category;

/// Product as served by the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,

    /// Gallery image URLs.
    pub images: Vec<String>,

    /// Primary image URL.
    pub image: String,

    /// Current price, in the API's smallest currency unit.
    pub price: u64,

    /// Price before the current discount.
    pub price_before_discount: u64,

    /// Average rating.
    pub rating: f64,

    /// Units in stock.
    pub quantity: u64,

    /// Units sold.
    pub sold: u64,

    /// View counter.
    pub view: u64,

    /// Display name.
    pub name: String,

    /// Long-form description (may contain markup).
    pub description: String,

    /// Category the product belongs to.
    pub category: Category,

    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,

    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}

/// One page of the product catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductList {
    /// Products on this page.
    pub products: Vec<Product>,

    /// Paging information.
    pub pagination: Pagination,
}

/// Paging information returned alongside a product page.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    /// Current page, 1-based.
    pub page: u32,

    /// Requested page size.
    pub limit: u32,

    /// Total number of pages.
    pub page_size: u32,
}
