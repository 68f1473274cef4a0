//! Auth service.
//!
//! Thin wrappers over the auth endpoints. Session capture and teardown
//! happen inside the client pipeline when these endpoints respond, so the
//! wrappers only shape requests and surface the response payload.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    client::{ApiMessage, ApiSuccess, ClientError, StorefrontClient},
    domain::auth::models::{AuthPayload, Credentials},
};

/// Account lifecycle backed by the storefront API.
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    client: StorefrontClient,
}

impl HttpAuthService {
    #[must_use]
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn register(&self, credentials: Credentials) -> Result<AuthPayload, ClientError> {
        let path = self.client.endpoints().register.clone();
        let envelope: ApiSuccess<AuthPayload> = self.client.post(&path, &credentials).await?;

        Ok(envelope.data)
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthPayload, ClientError> {
        let path = self.client.endpoints().login.clone();
        let envelope: ApiSuccess<AuthPayload> = self.client.post(&path, &credentials).await?;

        Ok(envelope.data)
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let path = self.client.endpoints().logout.clone();
        let _acknowledgement: ApiMessage = self.client.post_empty(&path).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account; the response also opens a session.
    async fn register(&self, credentials: Credentials) -> Result<AuthPayload, ClientError>;

    /// Open a session.
    async fn login(&self, credentials: Credentials) -> Result<AuthPayload, ClientError>;

    /// Close the current session.
    async fn logout(&self) -> Result<(), ClientError>;
}
