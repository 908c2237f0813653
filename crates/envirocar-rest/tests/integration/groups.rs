//! Group and membership resources.

use envirocar_core::GroupService;
use http::{Method, StatusCode};
use serde_json::{Value, json};

use crate::common::{BASE, TestApp};

fn member_names(body: &Value) -> Vec<String> {
    body["users"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["name"].as_str().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_list_and_get_group() {
    let app = TestApp::new();
    let body = app.get("/groups").send().await.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["groups"][0]["href"], format!("{BASE}/groups/drivers"));

    let body = app.get("/groups/drivers").send().await.json();
    assert_eq!(body["description"], "Commuters");
    assert_eq!(body["members"], format!("{BASE}/groups/drivers/members"));
    assert!(body.get("owner").is_none());

    let body = app.get("/groups/drivers").as_user("alice").send().await.json();
    assert_eq!(body["owner"]["name"], "alice");
}

#[tokio::test]
async fn test_unknown_group_is_not_found() {
    let app = TestApp::new();
    assert_eq!(app.get("/groups/none").send().await.status, StatusCode::NOT_FOUND);
    let resp = app
        .request(Method::PUT, "/groups/none/members/carol")
        .as_user("carol")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_members() {
    let app = TestApp::new();
    let body = app.get("/groups/drivers/members").send().await.json();
    assert_eq!(member_names(&body), vec!["alice", "bob"]);
}

#[tokio::test]
async fn test_create_group() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/groups")
        .as_user("carol")
        .json(&json!({"name": "cyclists", "description": "On two wheels"}))
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.header("location"), Some(format!("{BASE}/groups/cyclists").as_str()));

    let group = app.store.get_group("cyclists").unwrap();
    assert_eq!(group.owner, "carol");
    assert!(app.store.is_member("cyclists", "carol").unwrap());
}

#[tokio::test]
async fn test_anonymous_cannot_create_group() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/groups")
        .json(&json!({"name": "cyclists"}))
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_group_name() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/groups")
        .as_user("carol")
        .json(&json!({"name": "a/b"}))
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"]["field"], "name");
}

#[tokio::test]
async fn test_delete_group_owner_only() {
    let app = TestApp::new();
    let resp = app
        .request(Method::DELETE, "/groups/drivers")
        .as_user("bob")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let resp = app
        .request(Method::DELETE, "/groups/drivers")
        .as_user("alice")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get("/groups/drivers").send().await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_join_and_leave() {
    let app = TestApp::new();
    let resp = app
        .request(Method::PUT, "/groups/drivers/members/carol")
        .as_user("carol")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert!(app.store.is_member("drivers", "carol").unwrap());

    let resp = app
        .request(Method::DELETE, "/groups/drivers/members/carol")
        .as_user("carol")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert!(!app.store.is_member("drivers", "carol").unwrap());

    let resp = app
        .request(Method::DELETE, "/groups/drivers/members/carol")
        .as_user("carol")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_membership_of_others() {
    let app = TestApp::new();
    let resp = app
        .request(Method::PUT, "/groups/drivers/members/carol")
        .as_user("bob")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let resp = app
        .request(Method::DELETE, "/groups/drivers/members/bob")
        .as_user("root")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert!(!app.store.is_member("drivers", "bob").unwrap());
}
