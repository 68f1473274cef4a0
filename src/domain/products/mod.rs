//! Product catalog.

mod models;
mod query;
mod service;

pub use models::{Pagination, Product, ProductList};
pub use query::{ProductListQuery, SortBy, SortOrder};
pub use service::{HttpProductsService, MockProductsService, ProductsService};
