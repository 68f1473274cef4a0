//! Categories service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    client::{ApiSuccess, ClientError, StorefrontClient},
    domain::categories::models::Category,
};

const CATEGORIES_PATH: &str = "/categories";

/// Category access backed by the storefront API.
#[derive(Debug, Clone)]
pub struct HttpCategoriesService {
    client: StorefrontClient,
}

impl HttpCategoriesService {
    #[must_use]
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoriesService for HttpCategoriesService {
    async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let envelope: ApiSuccess<Vec<Category>> = self.client.get(CATEGORIES_PATH).await?;

        Ok(envelope.data)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieve all categories.
    async fn list_categories(&self) -> Result<Vec<Category>, ClientError>;
}
