//! Data-fetch sequence tests
//!
//! wiremock stands in for the provider's data API. Request counts prove
//! the sequence stops where it should.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use creatorpulse_client::{fetch_dashboard, GraphClient, Session};
use creatorpulse_core::ApiError;
use creatorpulse_storage::MemorySessionStore;
use tests::mock_endpoints;

const ACCOUNT_ID: &str = "17841400000";

async fn logged_in_session() -> Session {
    let session = Session::new(Arc::new(MemorySessionStore::new()));
    session.store_login("tok", None).await.unwrap();
    session
}

fn graph_error(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({
        "error": {
            "message": message,
            "type": "OAuthException",
            "code": code
        }
    }))
}

#[tokio::test]
async fn test_fetch_sequence_happy_path() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v22.0/me"))
        .and(query_param("access_token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": ACCOUNT_ID,
            "username": "creator"
        })))
        .expect(1)
        .mount(&provider)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v22.0/{}", ACCOUNT_ID)))
        .and(query_param("access_token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": ACCOUNT_ID,
            "username": "creator",
            "name": "Creator Jones",
            "followers_count": 1500,
            "follows_count": 300,
            "media_count": 42
        })))
        .expect(1)
        .mount(&provider)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v22.0/{}/insights", ACCOUNT_ID)))
        .and(query_param("period", "day"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "name": "reach",
                    "period": "day",
                    "values": [
                        { "value": 100 },
                        { "value": null },
                        { "value": 50 }
                    ]
                },
                {
                    "name": "profile_views",
                    "period": "day",
                    "values": [
                        { "value": 10 },
                        { "value": 30 }
                    ]
                }
            ]
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let session = logged_in_session().await;
    let graph = GraphClient::new(mock_endpoints(&provider.uri()));

    let data = fetch_dashboard(&session, &graph).await.unwrap();

    assert_eq!(data.profile.username, "creator");
    assert_eq!(data.profile.display_name(), "Creator Jones");
    assert_eq!(data.profile.followers_count, 1500);

    // reach is cumulative (sum of non-null); profile_views averages
    assert_eq!(data.insights.get("reach"), Some(&150));
    assert_eq!(data.insights.get("profile_views"), Some(&20));

    // Resolved id is kept for the next page load
    assert_eq!(
        session.user_id().await.unwrap(),
        Some(ACCOUNT_ID.to_string())
    );
}

#[tokio::test]
async fn test_expired_token_clears_session_and_stops() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v22.0/me"))
        .respond_with(graph_error(190, "Error validating access token"))
        .expect(1)
        .mount(&provider)
        .await;

    let session = logged_in_session().await;
    let graph = GraphClient::new(mock_endpoints(&provider.uri()));

    let result = fetch_dashboard(&session, &graph).await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert!(!session.is_logged_in().await, "token must be invalidated");

    // The identity lookup must be the only call that went out
    let requests = provider.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_other_provider_error_aborts_but_keeps_session() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v22.0/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": ACCOUNT_ID,
            "username": "creator"
        })))
        .expect(1)
        .mount(&provider)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v22.0/{}", ACCOUNT_ID)))
        .respond_with(graph_error(100, "Unsupported get request"))
        .expect(1)
        .mount(&provider)
        .await;

    let session = logged_in_session().await;
    let graph = GraphClient::new(mock_endpoints(&provider.uri()));

    let result = fetch_dashboard(&session, &graph).await;

    match result {
        Err(ApiError::Provider { message, code }) => {
            assert_eq!(message, "Unsupported get request");
            assert_eq!(code, Some(100));
        }
        other => panic!("expected provider error, got {:?}", other.map(|_| ())),
    }

    // The session survives non-expiry errors
    assert!(session.is_logged_in().await);

    // Insights must not have been requested
    let requests = provider.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_logged_out_fetch_fails_without_network() {
    let provider = MockServer::start().await;

    let session = Session::new(Arc::new(MemorySessionStore::new()));
    let graph = GraphClient::new(mock_endpoints(&provider.uri()));

    let result = fetch_dashboard(&session, &graph).await;

    assert!(matches!(result, Err(ApiError::Validation(_))));

    let requests = provider.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_expired_token_mid_sequence_clears_session() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v22.0/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": ACCOUNT_ID,
            "username": "creator"
        })))
        .expect(1)
        .mount(&provider)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v22.0/{}", ACCOUNT_ID)))
        .respond_with(graph_error(190, "Error validating access token"))
        .expect(1)
        .mount(&provider)
        .await;

    let session = logged_in_session().await;
    let graph = GraphClient::new(mock_endpoints(&provider.uri()));

    let result = fetch_dashboard(&session, &graph).await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert!(!session.is_logged_in().await);

    // Identity and profile only; insights never requested
    let requests = provider.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}
