//! Product categories.

mod models;
mod service;

pub use models::Category;
pub use service::{CategoriesService, HttpCategoriesService, MockCategoriesService};
