//! Content negotiation across JSON, RDF and Shapefile.

use envirocar_rest::ServerConfig;
use envirocar_rest::config::ShapefileConfig;
use http::StatusCode;

use crate::common::{BASE, TestApp};

#[tokio::test]
async fn test_root_document() {
    let app = TestApp::new();
    let resp = app.get("/").send().await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.content_type().starts_with("application/json"));
    let body = resp.json();
    assert_eq!(body["users"], format!("{BASE}/users"));
    assert_eq!(body["measurements"], format!("{BASE}/measurements"));

    let resp = app.get("/").header("Accept", "text/turtle").send().await;
    assert_eq!(resp.status, StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn test_json_is_the_default() {
    let app = TestApp::new();
    for accept in [None, Some("*/*"), Some("application/*")] {
        let mut req = app.get("/users/alice");
        if let Some(a) = accept {
            req = req.header("Accept", a);
        }
        let resp = req.send().await;
        assert_eq!(resp.status, StatusCode::OK, "accept {accept:?}");
        assert!(resp.content_type().starts_with("application/json"), "accept {accept:?}");
    }
}

#[tokio::test]
async fn test_turtle() {
    let app = TestApp::new();
    let resp = app
        .get("/users/alice")
        .header("Accept", "text/turtle")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.content_type().starts_with("text/turtle"));
    let text = resp.text();
    assert!(text.contains("foaf:nick \"alice\""));
    assert!(!text.contains("mailto:"));

    let text = app
        .get("/users/alice")
        .as_user("alice")
        .header("Accept", "text/turtle")
        .send()
        .await
        .text();
    assert!(text.contains("mailto:alice@example.org"));
}

#[tokio::test]
async fn test_rdf_xml() {
    let app = TestApp::new();
    let resp = app
        .get("/groups/drivers")
        .header("Accept", "application/rdf+xml")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.content_type().starts_with("application/rdf+xml"));
    let text = resp.text();
    assert!(text.contains("<rdf:RDF"));
    assert!(text.contains(&format!("{BASE}/groups/drivers")));
}

#[tokio::test]
async fn test_preference_by_quality() {
    let app = TestApp::new();
    let resp = app
        .get("/phenomena/Speed")
        .header("Accept", "application/json;q=0.5, text/turtle")
        .send()
        .await;
    assert!(resp.content_type().starts_with("text/turtle"));
}

#[tokio::test]
async fn test_media_type_parameters_are_kept() {
    let app = TestApp::new();
    let resp = app
        .get("/groups/drivers")
        .header("Accept", "text/turtle; charset=utf-8")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.content_type().starts_with("text/turtle"));
    assert!(resp.content_type().contains("charset=utf-8"));
    assert!(resp.text().contains("groups/drivers"));
}

#[tokio::test]
async fn test_unacceptable_media_type() {
    let app = TestApp::new();
    let resp = app
        .get("/users/alice")
        .header("Accept", "image/png")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NOT_ACCEPTABLE);
    assert!(resp.body.is_empty());

    let resp = app
        .get("/users/alice")
        .header("Accept", "application/x-zipped-shp")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn test_track_as_shapefile() {
    let app = TestApp::new();
    let resp = app
        .get("/tracks/t1")
        .header("Accept", "application/x-zipped-shp")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.content_type(), "application/x-zipped-shp");
    assert!(resp.body.starts_with(b"PK"));
}

#[tokio::test]
async fn test_track_too_long_for_shapefile() {
    let app = TestApp::with_config(ServerConfig {
        base_url: BASE.to_string(),
        shapefile: ShapefileConfig {
            max_measurements: 2,
        },
        ..Default::default()
    });
    let resp = app
        .get("/tracks/t1")
        .header("Accept", "application/x-zipped-shp")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::NOT_ACCEPTABLE);

    // JSON is unaffected by the limit.
    assert_eq!(app.get("/tracks/t1").send().await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_measurement_collection_as_ntriples() {
    let app = TestApp::new();
    let resp = app
        .get("/tracks/t1/measurements")
        .header("Accept", "application/n-triples")
        .send()
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let text = resp.text();
    assert!(text.lines().all(|l| l.is_empty() || l.ends_with(" .")));
    assert!(text.contains(&format!("<{BASE}/measurements/m0>")));
}
