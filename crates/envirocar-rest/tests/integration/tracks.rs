//! Tracks, measurements and phenomena.

use envirocar_core::{DataService, MeasurementFilter};
use http::{Method, StatusCode};
use serde_json::json;

use crate::common::{BASE, TRACK, TestApp, track_upload};

// ============================================================================
// Tracks
// ============================================================================

#[tokio::test]
async fn test_list_tracks() {
    let app = TestApp::new();
    let body = app.get("/tracks").send().await.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["tracks"][0]["id"], TRACK);
    assert_eq!(body["tracks"][0]["name"], "Morning");

    // bob is on alice's friend list.
    let body = app.get("/users/alice/tracks").as_user("bob").send().await.json();
    assert_eq!(body["total"], 1);
    let body = app.get("/users/bob/tracks").as_user("bob").send().await.json();
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_anonymous_cannot_tie_track_to_owner() {
    let app = TestApp::new();
    let body = app.get("/tracks/t1").send().await.json();
    assert!(body["properties"].get("owner").is_none());
    assert!(app.get("/users/alice").send().await.json().get("tracks").is_none());

    for viewer in [None, Some("carol")] {
        for uri in ["/users/alice/tracks", "/measurements?user=alice"] {
            let mut req = app.get(uri);
            if let Some(v) = viewer {
                req = req.as_user(v);
            }
            let resp = req.send().await;
            assert_eq!(resp.status, StatusCode::FORBIDDEN, "{uri} as {viewer:?}");
            assert!(!resp.text().contains(TRACK), "{uri} as {viewer:?}");
        }
    }
}

#[tokio::test]
async fn test_get_track_details() {
    let app = TestApp::new();
    let resp = app.get("/tracks/t1").send().await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.content_type().starts_with("application/json"));

    let body = resp.json();
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["properties"]["name"], "Morning");
    assert_eq!(body["properties"]["begin"], "2024-05-01T08:00:00Z");
    assert_eq!(body["properties"]["end"], "2024-05-01T08:00:10Z");
    assert_eq!(body["features"].as_array().unwrap().len(), 3);
    assert_eq!(
        body["features"][0]["properties"]["phenomena"]["Speed"]["unit"],
        "km/h"
    );
    assert!(body["properties"].get("owner").is_none());

    let body = app.get("/tracks/t1").as_user("alice").send().await.json();
    assert_eq!(body["properties"]["owner"]["name"], "alice");
}

#[tokio::test]
async fn test_unknown_track_is_not_found() {
    let app = TestApp::new();
    assert_eq!(app.get("/tracks/nope").send().await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.get("/tracks/nope/measurements").send().await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_upload_track() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/tracks")
        .as_user("carol")
        .json(&track_upload(2))
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let location = resp.header("location").unwrap().to_string();
    assert!(location.starts_with(&format!("{BASE}/tracks/")));

    let path = location.trim_start_matches(BASE).to_string();
    let body = app.get(&path).as_user("carol").send().await.json();
    assert_eq!(body["properties"]["name"], "Upload");
    assert_eq!(body["properties"]["owner"]["name"], "carol");
    let features = body["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[1]["properties"]["phenomena"]["Speed"]["value"], 31.0);
}

#[tokio::test]
async fn test_anonymous_upload_is_forbidden() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/tracks")
        .json(&track_upload(1))
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_upload_with_unknown_phenomenon() {
    let app = TestApp::new();
    let mut upload = track_upload(1);
    upload["features"][0]["properties"]["phenomena"] = json!({"Warp": 9});
    let resp = app
        .request(Method::POST, "/tracks")
        .as_user("carol")
        .json(&upload)
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"]["field"], "phenomenon");
}

#[tokio::test]
async fn test_upload_of_wrong_document_type() {
    let app = TestApp::new();
    let resp = app
        .request(Method::POST, "/tracks")
        .as_user("carol")
        .json(&json!({"type": "Feature", "features": []}))
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn test_delete_track() {
    let app = TestApp::new();
    let resp = app
        .request(Method::DELETE, "/tracks/t1")
        .as_user("bob")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let resp = app
        .request(Method::DELETE, "/tracks/t1")
        .as_user("alice")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get("/tracks/t1").send().await.status, StatusCode::NOT_FOUND);

    let filter = MeasurementFilter {
        track: Some(TRACK.to_string()),
        ..Default::default()
    };
    assert!(app.store.get_measurements(&filter).unwrap().is_empty());
}

// ============================================================================
// Measurements
// ============================================================================

#[tokio::test]
async fn test_track_measurements() {
    let app = TestApp::new();
    let body = app.get("/tracks/t1/measurements").send().await.json();
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["total"], 3);
    assert_eq!(body["features"][0]["properties"]["id"], "m0");
    assert_eq!(
        body["features"][0]["properties"]["track"],
        format!("{BASE}/tracks/t1")
    );
}

#[tokio::test]
async fn test_measurements_time_window() {
    let app = TestApp::new();
    let body = app
        .get("/measurements?track=t1&during=2024-05-01T07:59:00Z,2024-05-01T08:00:07Z")
        .send()
        .await
        .json();
    assert_eq!(body["total"], 2);

    let resp = app.get("/measurements?after=yesterday").send().await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_measurements_by_user() {
    let app = TestApp::new();
    let body = app
        .get("/measurements?user=alice")
        .as_user("alice")
        .send()
        .await
        .json();
    assert_eq!(body["total"], 3);
    let body = app.get("/measurements?user=bob").as_user("bob").send().await.json();
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_single_measurement() {
    let app = TestApp::new();
    let resp = app.get("/measurements/m1").send().await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["type"], "Feature");
    assert_eq!(body["geometry"]["type"], "Point");
    assert!(body["properties"].get("user").is_none());

    let body = app.get("/measurements/m1").as_user("bob").send().await.json();
    assert_eq!(body["properties"]["user"]["name"], "alice");

    assert_eq!(
        app.get("/measurements/m9").send().await.status,
        StatusCode::NOT_FOUND
    );
}

// ============================================================================
// Phenomena
// ============================================================================

#[tokio::test]
async fn test_phenomena() {
    let app = TestApp::new();
    let body = app.get("/phenomena").send().await.json();
    assert_eq!(body["total"], 2);

    let body = app.get("/phenomena/Speed").send().await.json();
    assert_eq!(body["unit"], "km/h");
    assert_eq!(body["href"], format!("{BASE}/phenomena/Speed"));

    assert_eq!(
        app.get("/phenomena/Warp").send().await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_create_phenomenon_admin_only() {
    let app = TestApp::new();
    let document = json!({"name": "CO2", "unit": "kg/h"});
    for viewer in [None, Some("alice")] {
        let mut req = app.request(Method::POST, "/phenomena").json(&document);
        if let Some(v) = viewer {
            req = req.as_user(v);
        }
        assert_eq!(req.send().await.status, StatusCode::FORBIDDEN);
    }

    let resp = app
        .request(Method::POST, "/phenomena")
        .as_user("root")
        .json(&document)
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.header("location"), Some(format!("{BASE}/phenomena/CO2").as_str()));

    let resp = app
        .request(Method::POST, "/phenomena")
        .as_user("root")
        .json(&document)
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
}
