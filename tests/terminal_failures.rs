//! Terminal failures: anything that is neither a 422 nor a recoverable
//! expiry invalidates the whole session.

use std::sync::Arc;

use bazaar::{
    client::{ClientConfig, ClientError, StorefrontClient},
    domain::products::{HttpProductsService, ProductListQuery, ProductsService},
    session::{CredentialStore, MemoryCredentialStore, MockNotificationSink},
};
use mockito::Matcher;
use testresult::TestResult;

mod support;

use support::{RecordingObserver, client_with_tokens};

#[tokio::test]
async fn server_error_notifies_clears_session_and_rejects() -> TestResult {
    let mut server = mockito::Server::new_async().await;

    let products_mock = server
        .mock("GET", "/products")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Internal error"}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, store, notifier) = client_with_tokens(&server.url(), "A1", "R1").await;

    let observer = Arc::new(RecordingObserver::new());
    client.subscribe(observer.clone()).await;

    let products = HttpProductsService::new(client.clone());

    let error = products
        .list_products(ProductListQuery::default())
        .await
        .expect_err("500 must be terminal");

    assert!(matches!(error, ClientError::Api { status, .. } if status.as_u16() == 500));

    assert_eq!(notifier.messages(), vec!["Internal error".to_owned()]);
    assert_eq!(client.access_token().await, "");
    assert_eq!(store.access_token().await?, None);
    assert_eq!(store.refresh_token().await?, None);
    assert_eq!(observer.cleared_count(), 1);

    products_mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn unauthorized_without_sentinel_is_terminal_not_refreshed() -> TestResult {
    let mut server = mockito::Server::new_async().await;

    let products_mock = server
        .mock("GET", "/products")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Unauthorized"}"#)
        .expect(1)
        .create_async()
        .await;

    // A plain 401 must never reach the refresh endpoint.
    let refresh_mock = server
        .mock("POST", "/refresh-access-token")
        .expect(0)
        .create_async()
        .await;

    let (client, store, notifier) = client_with_tokens(&server.url(), "A1", "R1").await;
    let products = HttpProductsService::new(client);

    let error = products
        .list_products(ProductListQuery::default())
        .await
        .expect_err("plain 401 must be terminal");

    assert!(matches!(error, ClientError::Api { status, .. } if status.as_u16() == 401));
    assert_eq!(store.refresh_token().await?, None, "session must be cleared");
    assert_eq!(notifier.messages(), vec!["Unauthorized".to_owned()]);

    products_mock.assert_async().await;
    refresh_mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn missing_message_falls_back_to_generic_default() -> TestResult {
    let mut server = mockito::Server::new_async().await;

    let products_mock = server
        .mock("GET", "/products")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("upstream unavailable")
        .expect(1)
        .create_async()
        .await;

    let (client, _store, notifier) = client_with_tokens(&server.url(), "A1", "R1").await;
    let products = HttpProductsService::new(client);

    products
        .list_products(ProductListQuery::default())
        .await
        .expect_err("503 must be terminal");

    assert_eq!(notifier.messages(), vec!["An error occurred".to_owned()]);

    products_mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn connection_failure_notifies_and_clears_session() -> TestResult {
    // Bind a server only to learn a free local port, then shut it down.
    let url = {
        let server = mockito::Server::new_async().await;
        server.url()
    };

    let (client, store, notifier) = client_with_tokens(&url, "A1", "R1").await;
    let products = HttpProductsService::new(client);

    let error = products
        .list_products(ProductListQuery::default())
        .await
        .expect_err("request against a closed port must fail");

    assert!(matches!(error, ClientError::Transport(_)));
    assert_eq!(store.access_token().await?, None);
    assert_eq!(store.refresh_token().await?, None);
    assert!(
        !notifier.messages().is_empty(),
        "transport failures must be notified"
    );

    Ok(())
}

#[tokio::test]
async fn notification_sink_receives_backend_message() -> TestResult {
    let mut server = mockito::Server::new_async().await;

    let products_mock = server
        .mock("GET", "/products")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Error","data":{"message":"Catalog offline"}}"#)
        .expect(1)
        .create_async()
        .await;

    let mut sink = MockNotificationSink::new();
    sink.expect_notify()
        .withf(|message| message == "Catalog offline")
        .times(1)
        .return_const(());

    let store = Arc::new(MemoryCredentialStore::with_tokens("A1", "R1"));
    let client = StorefrontClient::new(ClientConfig::new(server.url()), store, Arc::new(sink))
        .await?;

    let products = HttpProductsService::new(client);

    products
        .list_products(ProductListQuery::default())
        .await
        .expect_err("500 must be terminal");

    products_mock.assert_async().await;

    Ok(())
}
