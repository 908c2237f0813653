//! Token authentication through the full router.

use http::{Method, StatusCode};
use serde_json::json;

use crate::common::{BASE, TestApp};

#[tokio::test]
async fn test_anonymous_request_passes() {
    let app = TestApp::new();
    let resp = app.get("/users/alice").send().await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["name"], "alice");
}

#[tokio::test]
async fn test_valid_credentials_pass() {
    let app = TestApp::new();
    let resp = app.get("/users/alice").as_user("alice").send().await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["mail"], "alice@example.org");
}

#[tokio::test]
async fn test_username_without_token_is_bad_request() {
    let app = TestApp::new();
    let resp = app.get("/users").header("X-User", "alice").send().await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"]["category"], "authentication");
}

#[tokio::test]
async fn test_token_without_username_is_bad_request() {
    let app = TestApp::new();
    let resp = app.get("/users").header("X-Token", "alice-token").send().await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_username_is_bad_request() {
    let app = TestApp::new();
    let resp = app.get("/users").credentials("", "alice-token").send().await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wrong_token_is_forbidden() {
    let app = TestApp::new();
    let resp = app.get("/users").credentials("alice", "bob-token").send().await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_user_is_forbidden() {
    let app = TestApp::new();
    let resp = app.get("/users").credentials("mallory", "x").send().await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_failed_auth_never_reaches_handler() {
    let app = TestApp::new();
    let resp = app
        .request(Method::DELETE, "/users/carol")
        .credentials("carol", "wrong")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert!(app.get("/users/carol").send().await.status.is_success());
}

#[tokio::test]
async fn test_registration_is_open_to_anonymous_callers() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/users")
        .json(&json!({"name": "dave", "mail": "dave@example.org", "token": "secret"}))
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.header("location"), Some(format!("{BASE}/users/dave").as_str()));

    let resp = app
        .get("/users/dave")
        .credentials("dave", "secret")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["mail"], "dave@example.org");
}

#[tokio::test]
async fn test_custom_header_names() {
    let mut config = envirocar_rest::ServerConfig {
        base_url: BASE.to_string(),
        ..Default::default()
    };
    config.auth.username_header = "X-Envirocar-User".to_string();
    config.auth.token_header = "X-Envirocar-Token".to_string();
    let app = TestApp::with_config(config);

    let resp = app
        .get("/users/alice")
        .header("X-Envirocar-User", "alice")
        .header("X-Envirocar-Token", "alice-token")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["mail"], "alice@example.org");

    // The default headers are no longer consulted.
    let resp = app.get("/users/alice").as_user("alice").send().await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.json().get("mail").is_none());
}
