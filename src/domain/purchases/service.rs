//! Purchases service.

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;

use crate::{
    client::{ApiSuccess, ClientError, StorefrontClient},
    domain::purchases::models::{AddToCart, Purchase, PurchaseListStatus},
};

const PURCHASES_PATH: &str = "/purchases";

#[derive(Debug, Clone, Copy, Serialize)]
struct PurchaseListParams {
    status: PurchaseListStatus,
}

/// Cart and purchase access backed by the storefront API.
#[derive(Debug, Clone)]
pub struct HttpPurchasesService {
    client: StorefrontClient,
}

impl HttpPurchasesService {
    #[must_use]
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PurchasesService for HttpPurchasesService {
    async fn add_to_cart(&self, item: AddToCart) -> Result<Purchase, ClientError> {
        let envelope: ApiSuccess<Purchase> = self
            .client
            .post(&format!("{PURCHASES_PATH}/add-to-cart"), &item)
            .await?;

        Ok(envelope.data)
    }

    async fn list_purchases(
        &self,
        status: PurchaseListStatus,
    ) -> Result<Vec<Purchase>, ClientError> {
        let envelope: ApiSuccess<Vec<Purchase>> = self
            .client
            .get_query(PURCHASES_PATH, &PurchaseListParams { status })
            .await?;

        Ok(envelope.data)
    }
}

#[automock]
#[async_trait]
pub trait PurchasesService: Send + Sync {
    /// Put a product into the cart.
    async fn add_to_cart(&self, item: AddToCart) -> Result<Purchase, ClientError>;

    /// Retrieve purchases filtered by status.
    async fn list_purchases(
        &self,
        status: PurchaseListStatus,
    ) -> Result<Vec<Purchase>, ClientError>;
}
