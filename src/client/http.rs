//! Authenticated storefront HTTP client.
//!
//! Every application call goes through a single pipeline that attaches the
//! current access token, captures sessions handed out by the login and
//! register endpoints, tears the session down on logout, and transparently
//! recovers from access-token expiry: concurrent requests that hit an
//! expired token share a single refresh call, then each retries once with
//! the renewed credential. Any other failure except a 422 validation error
//! is terminal and invalidates the session as a whole.

use std::{fmt, sync::Arc};

use reqwest::{
    Method, StatusCode, Url,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
    multipart,
};
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::{
    client::{
        config::{AuthEndpoints, ClientConfig},
        envelope::{ApiSuccess, ErrorBody},
        errors::ClientError,
    },
    session::{CredentialStore, NotificationSink, SessionObserver},
};

/// Sentinel the backend places in `data.name` of a 401 response to
/// distinguish an expired access token from other authorization failures.
const EXPIRED_TOKEN_NAME: &str = "EXPIRED_TOKEN";

/// Message surfaced when a failure carries no usable message of its own.
const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Authenticated HTTP client for a storefront API.
///
/// Cheap to clone; all clones share the same session state and refresh
/// pipeline.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    endpoints: AuthEndpoints,
    tokens: RwLock<TokenPair>,
    // Serializes refreshes: whoever holds this lock is the only task allowed
    // to issue a refresh call.
    refresh_gate: Mutex<()>,
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn NotificationSink>,
    observers: RwLock<Vec<Arc<dyn SessionObserver>>>,
}

#[derive(Default)]
struct TokenPair {
    access: String,
    refresh: String,
}

impl Drop for TokenPair {
    fn drop(&mut self) {
        self.access.zeroize();
        self.refresh.zeroize();
    }
}

/// One attempt's worth of request configuration. Kept rebuildable so the
/// expiry recovery path can re-issue the exact request with a fresh token.
#[derive(Debug, Clone)]
struct RequestSpec {
    method: Method,
    path: String,
    query: Option<serde_json::Value>,
    body: RequestBody,
}

#[derive(Debug, Clone)]
enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartUpload),
}

#[derive(Debug, Clone)]
struct MultipartUpload {
    part_name: String,
    file_name: String,
    bytes: Vec<u8>,
}

impl MultipartUpload {
    fn to_form(&self) -> multipart::Form {
        let part = multipart::Part::bytes(self.bytes.clone()).file_name(self.file_name.clone());

        multipart::Form::new().part(self.part_name.clone(), part)
    }
}

enum DispatchFailure {
    /// The request could not be constructed; nothing went over the wire.
    Build(ClientError),

    /// The transport failed: connection error, timeout, or the response
    /// never arrived.
    Transport(reqwest::Error),

    /// The server answered with an unsuccessful status.
    Status { status: StatusCode, bytes: Vec<u8> },
}

#[derive(Debug, serde::Deserialize)]
struct SessionGrant {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    user: serde_json::Value,
}

#[derive(Debug, serde::Deserialize)]
struct RenewedToken {
    access_token: String,
}

impl StorefrontClient {
    /// Build a client from configuration and collaborators, loading the
    /// initial token pair from the credential store. The store is not read
    /// again afterwards; it becomes a write-through mirror of the in-memory
    /// session.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid, the underlying
    /// transport cannot be constructed, or the credential store cannot be
    /// read.
    pub async fn new(
        config: ClientConfig,
        store: Arc<dyn CredentialStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<Self, ClientError> {
        Url::parse(&config.base_url).map_err(|error| ClientError::InvalidUrl(error.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Transport)?;

        let access = store.access_token().await?.unwrap_or_default();
        let refresh = store.refresh_token().await?.unwrap_or_default();

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                endpoints: config.endpoints,
                tokens: RwLock::new(TokenPair { access, refresh }),
                refresh_gate: Mutex::new(()),
                store,
                notifier,
                observers: RwLock::new(Vec::new()),
            }),
        })
    }

    /// Paths of the auth-sensitive endpoints this client was built with.
    #[must_use]
    pub fn endpoints(&self) -> &AuthEndpoints {
        &self.inner.endpoints
    }

    /// Current in-memory access token; empty when unauthenticated.
    pub async fn access_token(&self) -> String {
        self.inner.tokens.read().await.access.clone()
    }

    /// Current in-memory refresh token; empty when unauthenticated.
    pub async fn refresh_token(&self) -> String {
        self.inner.tokens.read().await.refresh.clone()
    }

    /// Register an observer for session-cleared events.
    pub async fn subscribe(&self, observer: Arc<dyn SessionObserver>) {
        self.inner.observers.write().await.push(observer);
    }

    /// Issue a request with explicit method, path, query and JSON body.
    ///
    /// # Errors
    ///
    /// See [`ClientError`] for the failure taxonomy.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<serde_json::Value>,
        body: Option<serde_json::Value>,
    ) -> Result<T, ClientError> {
        self.execute(RequestSpec {
            method,
            path: path.to_owned(),
            query,
            body: body.map_or(RequestBody::Empty, RequestBody::Json),
        })
        .await
    }

    /// GET a JSON resource.
    ///
    /// # Errors
    ///
    /// See [`ClientError`] for the failure taxonomy.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::GET, path, None, None).await
    }

    /// GET a JSON resource with URL query parameters.
    ///
    /// # Errors
    ///
    /// See [`ClientError`] for the failure taxonomy.
    pub async fn get_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        Q: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let query = serde_json::to_value(query).map_err(ClientError::Encode)?;

        self.request(Method::GET, path, Some(query), None).await
    }

    /// POST a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ClientError`] for the failure taxonomy.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(ClientError::Encode)?;

        self.request(Method::POST, path, None, Some(body)).await
    }

    /// POST with an empty body.
    ///
    /// # Errors
    ///
    /// See [`ClientError`] for the failure taxonomy.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::POST, path, None, None).await
    }

    /// PUT a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ClientError`] for the failure taxonomy.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(ClientError::Encode)?;

        self.request(Method::PUT, path, None, Some(body)).await
    }

    /// POST a single file as a multipart form.
    ///
    /// # Errors
    ///
    /// See [`ClientError`] for the failure taxonomy.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        part_name: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<T, ClientError> {
        self.execute(RequestSpec {
            method: Method::POST,
            path: path.to_owned(),
            query: None,
            body: RequestBody::Multipart(MultipartUpload {
                part_name: part_name.to_owned(),
                file_name: file_name.to_owned(),
                bytes,
            }),
        })
        .await
    }

    async fn execute<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T, ClientError> {
        let token = self.access_token().await;

        match self.dispatch(&spec, &token).await {
            Ok(bytes) => {
                self.capture_session(&spec, &bytes).await;

                decode(&bytes)
            }
            Err(failure) => self.recover(spec, &token, failure).await,
        }
    }

    /// Send one request with the given access token attached and collect the
    /// response body.
    async fn dispatch(
        &self,
        spec: &RequestSpec,
        access_token: &str,
    ) -> Result<Vec<u8>, DispatchFailure> {
        let request = self
            .build_request(spec, access_token)
            .map_err(DispatchFailure::Build)?;

        let response = self
            .inner
            .http
            .execute(request)
            .await
            .map_err(DispatchFailure::Transport)?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(DispatchFailure::Transport)?
            .to_vec();

        if status.is_success() {
            Ok(bytes)
        } else {
            Err(DispatchFailure::Status { status, bytes })
        }
    }

    fn build_request(
        &self,
        spec: &RequestSpec,
        access_token: &str,
    ) -> Result<reqwest::Request, ClientError> {
        let url = self.request_url(&spec.path)?;
        let mut builder = self.inner.http.request(spec.method.clone(), url);

        if let Some(query) = &spec.query {
            builder = builder.query(query);
        }

        builder = match &spec.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(upload) => builder.multipart(upload.to_form()),
        };

        // The raw token is the header value; this API uses no "Bearer"
        // scheme prefix.
        if !access_token.is_empty() {
            builder = builder.header(AUTHORIZATION, access_token);
        }

        builder.build().map_err(ClientError::Transport)
    }

    fn request_url(&self, path: &str) -> Result<Url, ClientError> {
        let url = if path.starts_with('/') {
            format!("{}{path}", self.inner.base_url)
        } else {
            format!("{}/{path}", self.inner.base_url)
        };

        Url::parse(&url).map_err(|error| ClientError::InvalidUrl(error.to_string()))
    }

    /// Success-path interception: login/register responses carry a new
    /// session, a logout response tears the current one down. Everything
    /// else passes through untouched.
    async fn capture_session(&self, spec: &RequestSpec, bytes: &[u8]) {
        let endpoints = &self.inner.endpoints;

        if spec.path == endpoints.login || spec.path == endpoints.register {
            match serde_json::from_slice::<ApiSuccess<SessionGrant>>(bytes) {
                Ok(envelope) => self.adopt_session(envelope.data).await,
                Err(error) => {
                    debug!(%error, "auth response did not carry a session grant");
                }
            }
        } else if spec.path == endpoints.logout {
            self.clear_session().await;
        }
    }

    async fn adopt_session(&self, grant: SessionGrant) {
        {
            let mut pair = self.inner.tokens.write().await;
            pair.access = grant.access_token.clone();
            pair.refresh = grant.refresh_token.clone();
        }

        // Write-through is best effort; the in-memory pair stays the source
        // of truth for the rest of the process lifetime.
        if let Err(error) = self.inner.store.save_access_token(&grant.access_token).await {
            warn!(%error, "failed to persist access token");
        }
        if let Err(error) = self
            .inner
            .store
            .save_refresh_token(&grant.refresh_token)
            .await
        {
            warn!(%error, "failed to persist refresh token");
        }
        if let Err(error) = self.inner.store.save_profile(&grant.user).await {
            warn!(%error, "failed to persist user profile");
        }
    }

    /// Failure-path interception. Validation failures pass through; an
    /// expired access token on a non-refresh endpoint enters the
    /// refresh-and-retry protocol (at most once per original request); every
    /// other failure is terminal and invalidates the session.
    async fn recover<T: DeserializeOwned>(
        &self,
        spec: RequestSpec,
        sent_token: &str,
        failure: DispatchFailure,
    ) -> Result<T, ClientError> {
        match failure {
            DispatchFailure::Build(error) => Err(error),
            DispatchFailure::Status { status, bytes } => {
                let body = ErrorBody::from_slice(&bytes);

                if status == StatusCode::UNPROCESSABLE_ENTITY {
                    return Err(ClientError::Validation(body));
                }

                if is_expired_token(status, &body, &spec.path, &self.inner.endpoints) {
                    return self.refresh_and_retry(spec, sent_token).await;
                }

                self.terminal_status(status, body).await
            }
            DispatchFailure::Transport(error) => {
                self.fail_terminally(&error.to_string()).await;

                Err(ClientError::Transport(error))
            }
        }
    }

    /// Obtain a fresh access token and re-issue the original request once.
    /// A failure of the retried request is never fed back into the refresh
    /// protocol; it settles through [`Self::settle_failure`] instead.
    async fn refresh_and_retry<T: DeserializeOwned>(
        &self,
        spec: RequestSpec,
        stale_token: &str,
    ) -> Result<T, ClientError> {
        let fresh = self.renewed_access_token(stale_token).await?;

        match self.dispatch(&spec, &fresh).await {
            Ok(bytes) => {
                self.capture_session(&spec, &bytes).await;

                decode(&bytes)
            }
            Err(failure) => self.settle_failure(failure).await,
        }
    }

    /// Failure handling without the refresh protocol: validation failures
    /// pass through, everything else is terminal.
    async fn settle_failure<T: DeserializeOwned>(
        &self,
        failure: DispatchFailure,
    ) -> Result<T, ClientError> {
        match failure {
            DispatchFailure::Build(error) => Err(error),
            DispatchFailure::Status { status, bytes } => {
                let body = ErrorBody::from_slice(&bytes);

                if status == StatusCode::UNPROCESSABLE_ENTITY {
                    return Err(ClientError::Validation(body));
                }

                self.terminal_status(status, body).await
            }
            DispatchFailure::Transport(error) => {
                self.fail_terminally(&error.to_string()).await;

                Err(ClientError::Transport(error))
            }
        }
    }

    async fn terminal_status<T: DeserializeOwned>(
        &self,
        status: StatusCode,
        body: ErrorBody,
    ) -> Result<T, ClientError> {
        let message = body
            .display_message()
            .unwrap_or(DEFAULT_ERROR_MESSAGE)
            .to_owned();

        self.fail_terminally(&message).await;

        Err(ClientError::Api { status, body })
    }

    /// Single-flight refresh. The first task through the gate issues the
    /// refresh call; tasks that queued behind it find the renewed token (or
    /// the cleared session) already in place and never hit the refresh
    /// endpoint themselves.
    async fn renewed_access_token(&self, stale_token: &str) -> Result<String, ClientError> {
        let _refresh_gate = self.inner.refresh_gate.lock().await;

        let (access, refresh) = {
            let pair = self.inner.tokens.read().await;

            (pair.access.clone(), pair.refresh.clone())
        };

        if access != stale_token && !access.is_empty() {
            debug!("reusing access token renewed by a concurrent request");

            return Ok(access);
        }

        if refresh.is_empty() {
            return Err(ClientError::SessionInvalidated);
        }

        debug!("access token expired, refreshing");

        let spec = RequestSpec {
            method: Method::POST,
            path: self.inner.endpoints.refresh.clone(),
            query: None,
            body: RequestBody::Json(serde_json::json!({ "refresh_token": refresh })),
        };

        let bytes = match self.dispatch(&spec, &access).await {
            Ok(bytes) => bytes,
            Err(failure) => return Err(self.fail_refresh(failure).await),
        };

        let envelope: ApiSuccess<RenewedToken> = decode(&bytes)?;
        let renewed = envelope.data.access_token;

        self.inner.tokens.write().await.access = renewed.clone();

        if let Err(error) = self.inner.store.save_access_token(&renewed).await {
            warn!(%error, "failed to persist renewed access token");
        }

        Ok(renewed)
    }

    /// A failed refresh always invalidates the session, whatever the status:
    /// notify, clear, and hand the failure back to every waiting request.
    async fn fail_refresh(&self, failure: DispatchFailure) -> ClientError {
        let error = match failure {
            DispatchFailure::Build(error) => return error,
            DispatchFailure::Status { status, bytes } => {
                let body = ErrorBody::from_slice(&bytes);
                let message = body
                    .display_message()
                    .unwrap_or(DEFAULT_ERROR_MESSAGE)
                    .to_owned();

                self.inner.notifier.notify(&message);

                ClientError::Api { status, body }
            }
            DispatchFailure::Transport(error) => {
                self.inner.notifier.notify(&error.to_string());

                ClientError::Transport(error)
            }
        };

        self.clear_session().await;

        error
    }

    async fn fail_terminally(&self, message: &str) {
        self.inner.notifier.notify(message);
        self.clear_session().await;
    }

    /// Drop both tokens and the persisted profile together, then tell every
    /// subscribed observer.
    async fn clear_session(&self) {
        {
            let mut pair = self.inner.tokens.write().await;
            pair.access.zeroize();
            pair.refresh.zeroize();
        }

        if let Err(error) = self.inner.store.clear_all().await {
            warn!(%error, "failed to clear persisted session");
        }

        let observers = self.inner.observers.read().await;

        for observer in observers.iter() {
            observer.session_cleared();
        }
    }
}

impl fmt::Debug for StorefrontClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorefrontClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(bytes).map_err(ClientError::Decode)
}

fn is_expired_token(
    status: StatusCode,
    body: &ErrorBody,
    path: &str,
    endpoints: &AuthEndpoints,
) -> bool {
    status == StatusCode::UNAUTHORIZED
        && body.error_name() == Some(EXPIRED_TOKEN_NAME)
        && path != endpoints.refresh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expired_body() -> ErrorBody {
        ErrorBody::from_slice(br#"{"data":{"message":"Token expired","name":"EXPIRED_TOKEN"}}"#)
    }

    #[test]
    fn expired_token_requires_sentinel_name() {
        let endpoints = AuthEndpoints::default();
        let plain = ErrorBody::from_slice(br#"{"message":"Unauthorized"}"#);

        assert!(is_expired_token(
            StatusCode::UNAUTHORIZED,
            &expired_body(),
            "/purchases",
            &endpoints
        ));
        assert!(!is_expired_token(
            StatusCode::UNAUTHORIZED,
            &plain,
            "/purchases",
            &endpoints
        ));
    }

    #[test]
    fn expired_token_requires_unauthorized_status() {
        let endpoints = AuthEndpoints::default();

        assert!(!is_expired_token(
            StatusCode::FORBIDDEN,
            &expired_body(),
            "/purchases",
            &endpoints
        ));
    }

    #[test]
    fn refresh_endpoint_never_counts_as_expired() {
        let endpoints = AuthEndpoints::default();

        assert!(!is_expired_token(
            StatusCode::UNAUTHORIZED,
            &expired_body(),
            "/refresh-access-token",
            &endpoints
        ));
    }
}
