#![allow(clippy::unwrap_used)]
// Integration tests for the `HubClient` request executor using wiremock.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hubctl_api::models::VersionResponse;
use hubctl_api::{ApiRequest, CancellationToken, ClientConfig, Error, HubClient, decode};

// ── Helpers ─────────────────────────────────────────────────────────

fn no_env() -> HashMap<&'static str, &'static str> {
    HashMap::new()
}

async fn setup() -> (MockServer, HubClient) {
    let server = MockServer::start().await;
    let config = ClientConfig::builder()
        .api_token("test-token")
        .api_url(format!("{}/hub/api", server.uri()))
        .resolve_with(&no_env())
        .unwrap();
    (server, HubClient::new(config).unwrap())
}

// ── Success path ────────────────────────────────────────────────────

#[tokio::test]
async fn test_version_round_trip() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/hub/api/"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "4.0.2" })))
        .expect(1)
        .mount(&server)
        .await;

    let version = client.version().await.unwrap();
    assert_eq!(version.version, "4.0.2");
}

#[tokio::test]
async fn test_execute_returns_body_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/hub/api/info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"version\":\"5.1.0\"}"))
        .mount(&server)
        .await;

    let body = client.execute(ApiRequest::get("info")).await.unwrap();
    assert_eq!(&body[..], b"{\"version\":\"5.1.0\"}");
    let version: VersionResponse = decode(&body).unwrap();
    assert_eq!(version.version, "5.1.0");
}

#[tokio::test]
async fn test_empty_success_body_is_accepted() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/hub/api/users/alice"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_user("alice").await.unwrap();
}

#[tokio::test]
async fn test_basic_auth_header() {
    let server = MockServer::start().await;
    let config = ClientConfig::builder()
        .basic_auth("user", "pass")
        .api_url(format!("{}/hub/api", server.uri()))
        .resolve_with(&no_env())
        .unwrap();
    let client = HubClient::new(config).unwrap();

    Mock::given(method("GET"))
        .and(path("/hub/api/user"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "user" })))
        .expect(1)
        .mount(&server)
        .await;

    let me = client.current_user().await.unwrap();
    assert_eq!(me.name, "user");
}

#[tokio::test]
async fn test_custom_content_type_and_raw_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/hub/api/custom"))
        .and(header("Content-Type", "text/plain"))
        .and(body_string("hello hub"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::post("custom")
        .with_content_type("text/plain")
        .with_body("hello hub");
    client.execute(request).await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_is_unexpected_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/hub/api/users/ghost"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "status": 404, "message": "Not found" })),
        )
        .mount(&server)
        .await;

    let err = client.get_user("ghost").await.unwrap_err();
    assert!(
        matches!(err, Error::UnexpectedStatus { status: 404 }),
        "expected UnexpectedStatus(404), got: {err:?}"
    );
    assert!(err.is_not_found());
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_forbidden_is_auth_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/hub/api/info"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client.info().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(err.is_auth_rejected());
}

#[tokio::test]
async fn test_non_json_success_is_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/hub/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client.version().await.unwrap_err();
    match err {
        Error::Decode { body, .. } => assert_eq!(body, "<html>login</html>"),
        other => panic!("expected Decode, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport() {
    let config = ClientConfig::builder()
        .api_token("test-token")
        .api_url("http://127.0.0.1:1/hub/api")
        .resolve_with(&no_env())
        .unwrap();
    let client = HubClient::new(config).unwrap();

    let err = client.version().await.unwrap_err();
    assert!(
        matches!(err, Error::Transport(_)),
        "expected Transport, got: {err:?}"
    );
}

// ── Cancellation tests ──────────────────────────────────────────────

#[tokio::test]
async fn test_cancel_before_send() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/hub/api/info"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = client
        .execute_cancellable(ApiRequest::get("info"), &cancel)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_repeated_cancel_then_reuse_client() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/hub/api/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hub/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "4.0.2" })))
        .mount(&server)
        .await;

    for _ in 0..5 {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = client
            .execute_cancellable(ApiRequest::get("slow"), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));

        let version = client.version().await.unwrap();
        assert_eq!(version.version, "4.0.2");
    }
}
