//! Shared fixtures for client integration tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use bazaar::{
    client::{ClientConfig, StorefrontClient},
    session::{MemoryCredentialStore, NotificationSink, SessionObserver},
};

/// Notification sink that records every message it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("notifier lock").clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .expect("notifier lock")
            .push(message.to_owned());
    }
}

/// Observer that counts session-cleared events.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    cleared: AtomicUsize,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cleared_count(&self) -> usize {
        self.cleared.load(Ordering::SeqCst)
    }
}

impl SessionObserver for RecordingObserver {
    fn session_cleared(&self) {
        self.cleared.fetch_add(1, Ordering::SeqCst);
    }
}

/// Client over the given mock server with a seeded in-memory session.
pub async fn client_with_tokens(
    server_url: &str,
    access: &str,
    refresh: &str,
) -> (
    StorefrontClient,
    Arc<MemoryCredentialStore>,
    Arc<RecordingNotifier>,
) {
    let store = Arc::new(MemoryCredentialStore::with_tokens(access, refresh));
    let notifier = Arc::new(RecordingNotifier::new());

    let client = StorefrontClient::new(
        ClientConfig::new(server_url),
        store.clone(),
        notifier.clone(),
    )
    .await
    .expect("client should build");

    (client, store, notifier)
}

/// Client over the given mock server with no existing session.
pub async fn anonymous_client(
    server_url: &str,
) -> (
    StorefrontClient,
    Arc<MemoryCredentialStore>,
    Arc<RecordingNotifier>,
) {
    let store = Arc::new(MemoryCredentialStore::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let client = StorefrontClient::new(
        ClientConfig::new(server_url),
        store.clone(),
        notifier.clone(),
    )
    .await
    .expect("client should build");

    (client, store, notifier)
}

/// 401 body carrying the expired-token sentinel.
pub const EXPIRED_TOKEN_BODY: &str =
    r#"{"message":"Error","data":{"message":"Token expired","name":"EXPIRED_TOKEN"}}"#;

/// Empty purchases page.
pub const EMPTY_LIST_BODY: &str = r#"{"message":"OK","data":[]}"#;

/// Login/register success envelope for user `a@b.com` with tokens A1/R1.
pub fn auth_success_body(access: &str, refresh: &str) -> String {
    format!(
        r#"{{
            "message": "Success",
            "data": {{
                "access_token": "{access}",
                "expires": 3600,
                "refresh_token": "{refresh}",
                "expires_refresh_token": 86400,
                "user": {{
                    "_id": "6124d49b7b37d6a7aedf0f22",
                    "roles": ["User"],
                    "email": "a@b.com",
                    "createdAt": "2024-01-01T00:00:00.000Z",
                    "updatedAt": "2024-01-01T00:00:00.000Z",
                    "__v": 0
                }}
            }}
        }}"#
    )
}

/// Refresh success envelope carrying a renewed access token.
pub fn refresh_success_body(access: &str) -> String {
    format!(r#"{{"message":"Refresh token succeeded","data":{{"access_token":"{access}"}}}}"#)
}
