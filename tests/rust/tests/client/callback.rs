//! Callback handling tests
//!
//! wiremock stands in for the gateway's exchange endpoint; the mock call
//! counts are what prove a cleaned URL never re-triggers an exchange.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use creatorpulse_client::{handle_callback, BackendClient, CallbackHandled, Session};
use creatorpulse_storage::MemorySessionStore;

const REDIRECT_URI: &str = "https://dash.test";

fn test_session() -> Session {
    Session::new(Arc::new(MemorySessionStore::new()))
}

#[tokio::test]
async fn test_successful_callback_stores_session_and_cleans_url() {
    let gateway = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exchange-token"))
        .and(body_string_contains("auth_code_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "IGQVJtoken",
            "user_id": "17841400000"
        })))
        .expect(1)
        .mount(&gateway)
        .await;

    let session = test_session();
    let backend = BackendClient::new(gateway.uri());
    let url = Url::parse("https://dash.test/?code=auth_code_123").unwrap();

    let (cleaned, handled) = handle_callback(&url, &session, &backend, REDIRECT_URI).await;

    assert_eq!(handled, CallbackHandled::LoggedIn);
    assert_eq!(cleaned.query(), None);
    assert!(session.is_logged_in().await);
    assert_eq!(
        session.access_token().await.unwrap(),
        Some("IGQVJtoken".to_string())
    );
    assert_eq!(
        session.user_id().await.unwrap(),
        Some("17841400000".to_string())
    );

    // A refresh of the cleaned URL must be a no-op: the mock's expect(1)
    // fails the test if a second exchange goes out.
    let (_, handled) = handle_callback(&cleaned, &session, &backend, REDIRECT_URI).await;
    assert_eq!(handled, CallbackHandled::NotCallback);
}

#[tokio::test]
async fn test_error_callback_cleans_url_without_exchanging() {
    let gateway = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exchange-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&gateway)
        .await;

    let session = test_session();
    let backend = BackendClient::new(gateway.uri());
    let url = Url::parse(
        "https://dash.test/?error=access_denied&error_description=User+denied+access",
    )
    .unwrap();

    let (cleaned, handled) = handle_callback(&url, &session, &backend, REDIRECT_URI).await;

    assert_eq!(
        handled,
        CallbackHandled::LoginFailed {
            message: "Login failed: User denied access".to_string()
        }
    );
    assert_eq!(cleaned.query(), None);
    assert!(!session.is_logged_in().await);
}

#[tokio::test]
async fn test_failed_exchange_surfaces_message_and_cleans_url() {
    let gateway = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exchange-token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Invalid authorization code"
        })))
        .expect(1)
        .mount(&gateway)
        .await;

    let session = test_session();
    let backend = BackendClient::new(gateway.uri());
    let url = Url::parse("https://dash.test/?code=spent_code").unwrap();

    let (cleaned, handled) = handle_callback(&url, &session, &backend, REDIRECT_URI).await;

    assert_eq!(
        handled,
        CallbackHandled::LoginFailed {
            message: "Failed to complete login: Invalid authorization code".to_string()
        }
    );
    assert_eq!(cleaned.query(), None);
    assert!(!session.is_logged_in().await);
}

#[tokio::test]
async fn test_plain_page_load_is_untouched() {
    let gateway = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exchange-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&gateway)
        .await;

    let session = test_session();
    let backend = BackendClient::new(gateway.uri());
    let url = Url::parse("https://dash.test/?tab=insights").unwrap();

    let (cleaned, handled) = handle_callback(&url, &session, &backend, REDIRECT_URI).await;

    assert_eq!(handled, CallbackHandled::NotCallback);
    assert_eq!(cleaned.query(), Some("tab=insights"));
}
