//! Persistent credential storage.

use std::path::PathBuf;

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

/// Errors raised by a credential store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("credential storage i/o error")]
    Io(#[from] std::io::Error),

    /// The stored session could not be encoded or decoded.
    #[error("credential storage encoding error")]
    Encoding(#[from] serde_json::Error),
}

/// Key-value storage for the session: access token, refresh token and the
/// user profile, persisted across process restarts.
///
/// The client reads tokens once at construction and writes through on every
/// change afterwards; the store is never read back to overwrite memory. The
/// profile is relayed as opaque JSON, its fields are never interpreted here.
#[automock]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Stored access token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be read.
    async fn access_token(&self) -> Result<Option<String>, StoreError>;

    /// Stored refresh token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be read.
    async fn refresh_token(&self) -> Result<Option<String>, StoreError>;

    /// Stored user profile, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be read.
    async fn profile(&self) -> Result<Option<serde_json::Value>, StoreError>;

    /// Persist a new access token.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be written.
    async fn save_access_token(&self, token: &str) -> Result<(), StoreError>;

    /// Persist a new refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be written.
    async fn save_refresh_token(&self, token: &str) -> Result<(), StoreError>;

    /// Persist the user profile.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be written.
    async fn save_profile(&self, profile: &serde_json::Value) -> Result<(), StoreError>;

    /// Remove both tokens and the profile in one step.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be written.
    async fn clear_all(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default)]
    access_token: String,

    #[serde(default)]
    refresh_token: String,

    #[serde(default)]
    profile: Option<serde_json::Value>,
}

impl StoredSession {
    fn is_empty(&self) -> bool {
        self.access_token.is_empty() && self.refresh_token.is_empty() && self.profile.is_none()
    }
}

/// In-process credential store. Used by tests and short-lived runs that do
/// not need the session to outlive the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    session: RwLock<StoredSession>,
}

impl MemoryCredentialStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing token pair.
    #[must_use]
    pub fn with_tokens(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            session: RwLock::new(StoredSession {
                access_token: access_token.into(),
                refresh_token: refresh_token.into(),
                profile: None,
            }),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn access_token(&self) -> Result<Option<String>, StoreError> {
        let session = self.session.read().await;

        Ok((!session.access_token.is_empty()).then(|| session.access_token.clone()))
    }

    async fn refresh_token(&self) -> Result<Option<String>, StoreError> {
        let session = self.session.read().await;

        Ok((!session.refresh_token.is_empty()).then(|| session.refresh_token.clone()))
    }

    async fn profile(&self) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.session.read().await.profile.clone())
    }

    async fn save_access_token(&self, token: &str) -> Result<(), StoreError> {
        self.session.write().await.access_token = token.to_owned();

        Ok(())
    }

    async fn save_refresh_token(&self, token: &str) -> Result<(), StoreError> {
        self.session.write().await.refresh_token = token.to_owned();

        Ok(())
    }

    async fn save_profile(&self, profile: &serde_json::Value) -> Result<(), StoreError> {
        self.session.write().await.profile = Some(profile.clone());

        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        *self.session.write().await = StoredSession::default();

        Ok(())
    }
}

/// Credential store backed by a JSON file, the desktop counterpart of the
/// browser's local storage.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,

    // Serializes read-modify-write cycles against the file.
    file_lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Store backed by the given file. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<StoredSession, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Ok(StoredSession::default())
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn save(&self, session: &StoredSession) -> Result<(), StoreError> {
        if session.is_empty() {
            match tokio::fs::remove_file(&self.path).await {
                Ok(()) => return Ok(()),
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
                Err(error) => return Err(error.into()),
            }
        }

        let bytes = serde_json::to_vec_pretty(session)?;

        tokio::fs::write(&self.path, bytes).await?;

        Ok(())
    }

    async fn update<F>(&self, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut StoredSession) + Send,
    {
        let _guard = self.file_lock.lock().await;
        let mut session = self.load().await?;

        apply(&mut session);

        self.save(&session).await
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn access_token(&self) -> Result<Option<String>, StoreError> {
        let _guard = self.file_lock.lock().await;
        let session = self.load().await?;

        Ok((!session.access_token.is_empty()).then_some(session.access_token))
    }

    async fn refresh_token(&self) -> Result<Option<String>, StoreError> {
        let _guard = self.file_lock.lock().await;
        let session = self.load().await?;

        Ok((!session.refresh_token.is_empty()).then_some(session.refresh_token))
    }

    async fn profile(&self) -> Result<Option<serde_json::Value>, StoreError> {
        let _guard = self.file_lock.lock().await;

        Ok(self.load().await?.profile)
    }

    async fn save_access_token(&self, token: &str) -> Result<(), StoreError> {
        self.update(|session| session.access_token = token.to_owned())
            .await
    }

    async fn save_refresh_token(&self, token: &str) -> Result<(), StoreError> {
        self.update(|session| session.refresh_token = token.to_owned())
            .await
    }

    async fn save_profile(&self, profile: &serde_json::Value) -> Result<(), StoreError> {
        let profile = profile.clone();

        self.update(|session| session.profile = Some(profile)).await
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.update(|session| *session = StoredSession::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips_tokens() -> TestResult {
        let store = MemoryCredentialStore::new();

        store.save_access_token("A1").await?;
        store.save_refresh_token("R1").await?;

        assert_eq!(store.access_token().await?.as_deref(), Some("A1"));
        assert_eq!(store.refresh_token().await?.as_deref(), Some("R1"));

        Ok(())
    }

    #[tokio::test]
    async fn memory_store_clear_all_removes_everything() -> TestResult {
        let store = MemoryCredentialStore::with_tokens("A1", "R1");

        store
            .save_profile(&serde_json::json!({"email": "a@b.com"}))
            .await?;
        store.clear_all().await?;

        assert_eq!(store.access_token().await?, None);
        assert_eq!(store.refresh_token().await?, None);
        assert_eq!(store.profile().await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn file_store_round_trips_session() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileCredentialStore::new(dir.path().join("session.json"));

        store.save_access_token("A1").await?;
        store.save_refresh_token("R1").await?;
        store
            .save_profile(&serde_json::json!({"email": "a@b.com"}))
            .await?;

        assert_eq!(store.access_token().await?.as_deref(), Some("A1"));
        assert_eq!(store.refresh_token().await?.as_deref(), Some("R1"));
        assert_eq!(
            store.profile().await?,
            Some(serde_json::json!({"email": "a@b.com"}))
        );

        Ok(())
    }

    #[tokio::test]
    async fn file_store_missing_file_reads_as_empty() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileCredentialStore::new(dir.path().join("absent.json"));

        assert_eq!(store.access_token().await?, None);
        assert_eq!(store.refresh_token().await?, None);
        assert_eq!(store.profile().await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn file_store_clear_all_removes_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        let store = FileCredentialStore::new(&path);

        store.save_access_token("A1").await?;
        assert!(path.exists(), "file should exist after a write");

        store.clear_all().await?;
        assert!(!path.exists(), "file should be removed on clear");

        Ok(())
    }
}
