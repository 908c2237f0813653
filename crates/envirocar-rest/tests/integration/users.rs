//! User, friend and fueling resources.

use envirocar_core::UserService;
use http::{Method, StatusCode};
use serde_json::{Value, json};

use crate::common::{BASE, FUELING, TestApp};

// ============================================================================
// Profiles and visibility
// ============================================================================

#[tokio::test]
async fn test_anonymous_sees_public_profile_only() {
    let app = TestApp::new();
    let body = app.get("/users/alice").send().await.json();
    assert_eq!(body["name"], "alice");
    assert_eq!(body["href"], format!("{BASE}/users/alice"));
    assert!(body.get("avatar").is_some());
    assert!(body.get("tracks").is_none());
    assert!(body.get("mail").is_none());
    assert!(body.get("firstName").is_none());
    assert!(body.get("fuelings").is_none());
}

#[tokio::test]
async fn test_friend_sees_profile_but_not_mail() {
    let app = TestApp::new();
    let body = app.get("/users/alice").as_user("bob").send().await.json();
    assert_eq!(body["firstName"], "Alice");
    assert_eq!(body["lastName"], "Liddell");
    assert!(body.get("friends").is_some());
    assert!(body.get("tracks").is_some());
    assert!(body.get("mail").is_none());
    assert!(body.get("admin").is_none());
}

#[tokio::test]
async fn test_stranger_sees_no_profile_fields() {
    let app = TestApp::new();
    let body = app.get("/users/alice").as_user("carol").send().await.json();
    assert_eq!(body["name"], "alice");
    assert!(body.get("firstName").is_none());
    assert!(body.get("groups").is_none());
}

#[tokio::test]
async fn test_group_mate_sees_groups_link() {
    let app = TestApp::new();
    // bob does not list alice as friend, but both are in `drivers`.
    let body = app.get("/users/bob").as_user("alice").send().await.json();
    assert!(body.get("groups").is_some());
    assert!(body.get("friends").is_none());
}

#[tokio::test]
async fn test_owner_and_admin_see_mail() {
    let app = TestApp::new();
    for viewer in ["alice", "root"] {
        let body = app.get("/users/alice").as_user(viewer).send().await.json();
        assert_eq!(body["mail"], "alice@example.org", "viewer {viewer}");
        assert!(body.get("fuelings").is_some(), "viewer {viewer}");
    }
}

#[tokio::test]
async fn test_admin_flag_visible_to_owner_and_admins() {
    let app = TestApp::new();
    let body = app.get("/users/root").as_user("root").send().await.json();
    assert_eq!(body["admin"], true);
    let body = app.get("/users/alice").as_user("alice").send().await.json();
    assert_eq!(body["admin"], false);
    let body = app.get("/users/alice").as_user("root").send().await.json();
    assert_eq!(body["admin"], false);

    for viewer in [Some("bob"), Some("carol"), None] {
        let mut req = app.get("/users/root");
        if let Some(v) = viewer {
            req = req.as_user(v);
        }
        assert!(req.send().await.json().get("admin").is_none(), "viewer {viewer:?}");
    }
}

#[tokio::test]
async fn test_advertised_avatar_resolves() {
    let app = TestApp::new();
    let body = app.get("/users/alice").send().await.json();
    let href = body["avatar"].as_str().unwrap();
    assert_eq!(href, format!("{BASE}/users/alice/avatar"));

    let resp = app.get(href.trim_start_matches(BASE)).send().await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    let location = resp.header("location").unwrap();
    assert!(location.starts_with("https://www.gravatar.com/avatar/"));
    assert!(!location.contains("example.org"));

    let other = app.get("/users/bob/avatar").send().await;
    assert_ne!(other.header("location"), Some(location));
    assert_eq!(
        app.get("/users/nobody/avatar").send().await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = TestApp::new();
    let resp = app.get("/users/nobody").send().await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.body.is_empty());
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_users() {
    let app = TestApp::new();
    let body = app.get("/users").send().await.json();
    assert_eq!(body["total"], 4);
    let names: Vec<&str> = body["users"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["name"].as_str())
        .collect();
    assert!(names.contains(&"alice"));
    assert!(names.contains(&"root"));
}

#[tokio::test]
async fn test_list_users_paginated() {
    let app = TestApp::new();
    let body = app.get("/users?page=1&limit=2").send().await.json();
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"], 4);
    let links = body["links"].as_array().unwrap();
    let next = links.iter().find(|l| l["rel"] == "next").unwrap();
    assert_eq!(next["href"], format!("{BASE}/users?page=2&limit=2"));
    assert!(links.iter().all(|l| l["rel"] != "prev"));
}

#[tokio::test]
async fn test_invalid_page_is_bad_request() {
    let app = TestApp::new();
    let resp = app.get("/users?page=zero").send().await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Registration and modification
// ============================================================================

#[tokio::test]
async fn test_registration_validation_error_has_body() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/users")
        .json(&json!({"name": "dave", "mail": "not-a-mail", "token": "t"}))
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let body = resp.json();
    assert_eq!(body["error"]["field"], "mail");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_registration_missing_field() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/users")
        .json(&json!({"name": "dave", "mail": "dave@example.org"}))
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"]["field"], "token");
}

#[tokio::test]
async fn test_registration_duplicate_is_conflict() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/users")
        .json(&json!({"name": "alice", "mail": "a2@example.org", "token": "t"}))
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/users")
        .header("Content-Type", "application/json")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_json_body_is_unsupported_media_type() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/users")
        .header("Content-Type", "text/plain")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_modify_own_profile() {
    let app = TestApp::new();
    let resp = app
        .request(Method::PUT, "/users/carol")
        .as_user("carol")
        .json(&json!({"country": "DE", "aboutMe": "Cyclist"}))
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let carol = app.store.get_user("carol").unwrap();
    assert_eq!(carol.country.as_deref(), Some("DE"));
    assert_eq!(carol.about_me.as_deref(), Some("Cyclist"));
}

#[tokio::test]
async fn test_modify_other_profile_is_forbidden() {
    let app = TestApp::new();
    let resp = app
        .request(Method::PUT, "/users/carol")
        .as_user("bob")
        .json(&json!({"country": "DE"}))
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rename_is_rejected() {
    let app = TestApp::new();
    let resp = app
        .request(Method::PUT, "/users/carol")
        .as_user("carol")
        .json(&json!({"name": "caroline"}))
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"]["field"], "name");
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new();
    let resp = app
        .request(Method::DELETE, "/users/carol")
        .as_user("bob")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let resp = app
        .request(Method::DELETE, "/users/carol")
        .as_user("carol")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get("/users/carol").send().await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_may_delete_anyone() {
    let app = TestApp::new();
    let resp = app
        .request(Method::DELETE, "/users/bob")
        .as_user("root")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
}

// ============================================================================
// Friends
// ============================================================================

fn names(body: &Value) -> Vec<String> {
    body["users"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["name"].as_str().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_friends_visible_to_friends() {
    let app = TestApp::new();
    let resp = app.get("/users/alice/friends").as_user("bob").send().await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(names(&resp.json()), vec!["bob"]);

    let resp = app.get("/users/alice/friends").as_user("carol").send().await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    let resp = app.get("/users/alice/friends").send().await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_add_and_remove_friend() {
    let app = TestApp::new();
    let resp = app
        .request(Method::PUT, "/users/carol/friends/alice")
        .as_user("carol")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    let body = app.get("/users/carol/friends").as_user("carol").send().await.json();
    assert_eq!(names(&body), vec!["alice"]);

    let resp = app
        .request(Method::DELETE, "/users/carol/friends/alice")
        .as_user("carol")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = app
        .request(Method::DELETE, "/users/carol/friends/alice")
        .as_user("carol")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_manage_friends_of_others_is_forbidden() {
    let app = TestApp::new();
    let resp = app
        .request(Method::PUT, "/users/carol/friends/bob")
        .as_user("bob")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_befriending_yourself_is_rejected() {
    let app = TestApp::new();
    let resp = app
        .request(Method::PUT, "/users/carol/friends/carol")
        .as_user("carol")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"]["field"], "friend");
}

#[tokio::test]
async fn test_groups_of_user() {
    let app = TestApp::new();
    let body = app.get("/users/bob/groups").as_user("bob").send().await.json();
    assert_eq!(body["groups"][0]["name"], "drivers");
}

// ============================================================================
// Fuelings
// ============================================================================

fn fueling_document() -> Value {
    json!({
        "time": "2024-06-01T12:00:00Z",
        "fuelType": "gasoline",
        "volume": {"value": 35.2, "unit": "l"},
        "cost": {"value": 59.9, "unit": "EUR"},
        "mileage": {"value": 12500, "unit": "km"},
        "partialFueling": true
    })
}

#[tokio::test]
async fn test_fuelings_are_private() {
    let app = TestApp::new();
    let resp = app.get("/users/alice/fuelings").as_user("alice").send().await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["fuelings"][0]["id"], FUELING);
    assert_eq!(body["fuelings"][0]["fuelType"], "diesel");

    for viewer in [Some("bob"), None] {
        let mut req = app.get("/users/alice/fuelings");
        if let Some(v) = viewer {
            req = req.as_user(v);
        }
        assert_eq!(req.send().await.status, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_single_fueling() {
    let app = TestApp::new();
    let resp = app
        .get(&format!("/users/alice/fuelings/{FUELING}"))
        .as_user("alice")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["volume"]["value"], 40.0);

    let resp = app.get("/users/alice/fuelings/missing").as_user("alice").send().await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_and_delete_fueling() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/users/carol/fuelings")
        .as_user("carol")
        .json(&fueling_document())
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let location = resp.header("location").unwrap().to_string();
    assert!(location.starts_with(&format!("{BASE}/users/carol/fuelings/")));
    let path = location.trim_start_matches(BASE).to_string();

    let body = app.get(&path).as_user("carol").send().await.json();
    assert_eq!(body["fuelType"], "gasoline");
    assert_eq!(body["partialFueling"], true);

    let resp = app.request(Method::DELETE, &path).as_user("bob").send().await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    let resp = app.request(Method::DELETE, &path).as_user("carol").send().await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(
        app.get(&path).as_user("carol").send().await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_create_fueling_for_someone_else_is_forbidden() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/users/alice/fuelings")
        .as_user("carol")
        .json(&fueling_document())
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_cannot_log_fueling_for_others() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/users/bob/fuelings")
        .as_user("root")
        .json(&fueling_document())
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    let body = app.get("/users/bob/fuelings").as_user("bob").send().await.json();
    assert_eq!(body["total"], 0);

    let resp = app
        .request(Method::POST, "/users/root/fuelings")
        .as_user("root")
        .json(&fueling_document())
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let location = resp.header("location").unwrap().to_string();
    assert!(location.starts_with(&format!("{BASE}/users/root/fuelings/")));
    let path = location.trim_start_matches(BASE).to_string();
    let body = app.get(&path).as_user("root").send().await.json();
    assert_eq!(body["user"]["name"], "root");
}
