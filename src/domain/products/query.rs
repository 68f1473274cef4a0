//! Catalog listing query parameters.

use serde::Serialize;

/// Sort key for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Newest first (default on the backend).
    CreatedAt,

    /// By view counter.
    View,

    /// By units sold.
    Sold,

    /// By price; combine with [`SortOrder`].
    Price,

    /// By rating.
    Rating,
}

/// Sort direction for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,

    /// Descending.
    Desc,
}

/// Query parameters accepted by the product listing endpoint. Unset fields
/// are omitted from the URL.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductListQuery {
    /// Page to fetch, 1-based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,

    /// Sort key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,

    /// Category identifier to filter by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Product identifier to exclude (e.g. the one currently displayed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Minimum rating, 1 to 5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_filter: Option<u32>,

    /// Minimum price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<u64>,

    /// Maximum price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<u64>,

    /// Full-text search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_are_omitted() {
        let query = ProductListQuery::default();
        let value = serde_json::to_value(&query).expect("query should serialize");

        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn sort_keys_use_backend_spelling() {
        let query = ProductListQuery {
            page: Some(2),
            sort_by: Some(SortBy::CreatedAt),
            order: Some(SortOrder::Desc),
            ..ProductListQuery::default()
        };
        let value = serde_json::to_value(&query).expect("query should serialize");

        assert_eq!(
            value,
            serde_json::json!({ "page": 2, "sort_by": "createdAt", "order": "desc" })
        );
    }
}
