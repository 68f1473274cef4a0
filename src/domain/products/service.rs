//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    client::{ApiSuccess, ClientError, StorefrontClient},
    domain::products::{
        models::{Product, ProductList},
        query::ProductListQuery,
    },
};

const PRODUCTS_PATH: &str = "/products";

/// Catalog access backed by the storefront API.
#[derive(Debug, Clone)]
pub struct HttpProductsService {
    client: StorefrontClient,
}

impl HttpProductsService {
    #[must_use]
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    async fn list_products(&self, query: ProductListQuery) -> Result<ProductList, ClientError> {
        let envelope: ApiSuccess<ProductList> =
            self.client.get_query(PRODUCTS_PATH, &query).await?;

        Ok(envelope.data)
    }

    async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        let envelope: ApiSuccess<Product> =
            self.client.get(&format!("{PRODUCTS_PATH}/{id}")).await?;

        Ok(envelope.data)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve one catalog page matching the query.
    async fn list_products(&self, query: ProductListQuery) -> Result<ProductList, ClientError>;

    /// Retrieve a single product by identifier.
    async fn get_product(&self, id: &str) -> Result<Product, ClientError>;
}
