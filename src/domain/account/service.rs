//! Account service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    client::{ApiSuccess, ClientError, StorefrontClient},
    domain::account::models::{UpdateProfileBody, User},
};

const PROFILE_PATH: &str = "/me";
const USER_PATH: &str = "/user";

/// Account management backed by the storefront API.
#[derive(Debug, Clone)]
pub struct HttpAccountService {
    client: StorefrontClient,
}

impl HttpAccountService {
    #[must_use]
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountService for HttpAccountService {
    async fn profile(&self) -> Result<User, ClientError> {
        let envelope: ApiSuccess<User> = self.client.get(PROFILE_PATH).await?;

        Ok(envelope.data)
    }

    async fn update_profile(&self, body: UpdateProfileBody) -> Result<User, ClientError> {
        let envelope: ApiSuccess<User> = self.client.put(USER_PATH, &body).await?;

        Ok(envelope.data)
    }

    async fn upload_avatar(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ClientError> {
        let envelope: ApiSuccess<String> = self
            .client
            .post_multipart(
                &format!("{USER_PATH}/upload-avatar"),
                "image",
                file_name,
                bytes,
            )
            .await?;

        Ok(envelope.data)
    }
}

#[automock]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Retrieve the authenticated user's profile.
    async fn profile(&self) -> Result<User, ClientError>;

    /// Update the authenticated user's profile.
    async fn update_profile(&self, body: UpdateProfileBody) -> Result<User, ClientError>;

    /// Upload a new avatar image; returns the stored file name to reference
    /// from a subsequent profile update.
    async fn upload_avatar(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ClientError>;
}
