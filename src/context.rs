//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    client::{ClientConfig, ClientError, StorefrontClient},
    domain::{
        account::{AccountService, HttpAccountService},
        auth::{AuthService, HttpAuthService},
        categories::{CategoriesService, HttpCategoriesService},
        products::{HttpProductsService, ProductsService},
        purchases::{HttpPurchasesService, PurchasesService},
    },
    session::{CredentialStore, NotificationSink},
};

/// Raised when the application context cannot be assembled.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The storefront client could not be constructed.
    #[error("failed to initialize storefront client")]
    Client(#[source] ClientError),
}

/// Shared service handles for one storefront session.
#[derive(Clone)]
pub struct AppContext {
    /// The underlying authenticated client.
    pub client: StorefrontClient,

    /// Account lifecycle.
    pub auth: Arc<dyn AuthService>,

    /// Product catalog.
    pub products: Arc<dyn ProductsService>,

    /// Product categories.
    pub categories: Arc<dyn CategoriesService>,

    /// Cart and purchases.
    pub purchases: Arc<dyn PurchasesService>,

    /// Profile management.
    pub account: Arc<dyn AccountService>,
}

impl AppContext {
    /// Build the application context around one authenticated client.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be constructed (invalid base
    /// URL or unreadable credential store).
    pub async fn from_config(
        config: ClientConfig,
        store: Arc<dyn CredentialStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<Self, AppInitError> {
        let client = StorefrontClient::new(config, store, notifier)
            .await
            .map_err(AppInitError::Client)?;

        Ok(Self {
            auth: Arc::new(HttpAuthService::new(client.clone())),
            products: Arc::new(HttpProductsService::new(client.clone())),
            categories: Arc::new(HttpCategoriesService::new(client.clone())),
            purchases: Arc::new(HttpPurchasesService::new(client.clone())),
            account: Arc::new(HttpAccountService::new(client.clone())),
            client,
        })
    }
}
