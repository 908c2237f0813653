//! Common test utilities and harness for the REST integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use chrono::{TimeZone, Utc};
use envirocar_core::{
    DataService, FriendService, FuelType, Fueling, Group, GroupService, InMemoryStore,
    Measurement, Phenomenon, Point, Quantity, Track, User, UserService,
};
use envirocar_rest::{AppState, ServerConfig, Services, router};
use http::{HeaderMap, Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

/// Base URL every resource link is built from.
pub const BASE: &str = "http://localhost/api";

/// Id of the seeded track owned by alice.
pub const TRACK: &str = "t1";

/// Id of alice's seeded fueling.
pub const FUELING: &str = "f1";

/// A router over a seeded store.
///
/// Seeded data:
/// - users `alice`, `bob`, `carol` and the admin `root`, each with the
///   token `<name>-token`; alice lists bob as friend
/// - group `drivers` owned by alice, with bob as member
/// - phenomena `Speed` (km/h) and `Rpm` (u/min)
/// - track `t1` of alice with three measurements
/// - fueling `f1` of alice
pub struct TestApp {
    /// The store behind the router, for checking side effects.
    pub store: Arc<InMemoryStore>,
    router: Router,
}

impl TestApp {
    /// Creates the seeded application.
    pub fn new() -> Self {
        Self::with_config(ServerConfig {
            base_url: BASE.to_string(),
            ..Default::default()
        })
    }

    /// Creates the seeded application with a custom configuration.
    pub fn with_config(config: ServerConfig) -> Self {
        let store = Arc::new(seeded_store());
        let state = AppState::new(Services::in_memory(store.clone()), &config)
            .expect("state should assemble");
        Self {
            store,
            router: router(state),
        }
    }

    /// Starts a request as anonymous.
    pub fn request(&self, method: Method, uri: &str) -> TestRequest<'_> {
        TestRequest {
            app: self,
            builder: Request::builder().method(method).uri(uri),
            body: Body::empty(),
        }
    }

    /// Starts a `GET` request.
    pub fn get(&self, uri: &str) -> TestRequest<'_> {
        self.request(Method::GET, uri)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A request under construction.
pub struct TestRequest<'a> {
    app: &'a TestApp,
    builder: http::request::Builder,
    body: Body,
}

impl TestRequest<'_> {
    /// Authenticates as `user` with the seeded token.
    pub fn as_user(self, user: &str) -> Self {
        self.credentials(user, &format!("{user}-token"))
    }

    /// Sends explicit credential headers.
    pub fn credentials(mut self, user: &str, token: &str) -> Self {
        self.builder = self.builder.header("X-User", user).header("X-Token", token);
        self
    }

    /// Adds a header.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets a JSON body.
    pub fn json(mut self, body: &Value) -> Self {
        self.builder = self.builder.header("Content-Type", "application/json");
        self.body = Body::from(serde_json::to_vec(body).expect("serializable body"));
        self
    }

    /// Sends the request through the router.
    pub async fn send(self) -> TestResponse {
        let request = self.builder.body(self.body).expect("valid request");
        let response = self
            .app
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body")
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// A collected response.
#[derive(Debug)]
pub struct TestResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Full body.
    pub body: Vec<u8>,
}

impl TestResponse {
    /// The body parsed as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("JSON body")
    }

    /// The body as text.
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("UTF-8 body")
    }

    /// A header value as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The `Content-Type` header.
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or_default()
    }
}

/// Builds the seeded store through the service traits.
pub fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    for name in ["alice", "bob", "carol"] {
        let user = User::new(name)
            .with_mail(format!("{name}@example.org"))
            .with_token(format!("{name}-token"));
        store.create_user(user).unwrap();
    }
    store
        .create_user(
            User::new("root")
                .with_mail("root@example.org")
                .with_token("root-token")
                .as_admin(),
        )
        .unwrap();
    store
        .modify_user(
            "alice",
            envirocar_core::UserUpdate {
                first_name: Some("Alice".into()),
                last_name: Some("Liddell".into()),
                ..Default::default()
            },
        )
        .unwrap();

    store.add_friend("alice", "bob").unwrap();

    store
        .create_group(Group::new("drivers", "alice").with_description("Commuters"))
        .unwrap();
    store.add_member("drivers", "bob").unwrap();

    store
        .create_phenomenon(Phenomenon::new("Speed").with_unit("km/h"))
        .unwrap();
    store
        .create_phenomenon(Phenomenon::new("Rpm").with_unit("u/min"))
        .unwrap();

    let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let measurements = (0..3u32)
        .map(|i| {
            Measurement::new(
                format!("m{i}"),
                "alice",
                start + chrono::Duration::seconds(5 * i64::from(i)),
                Point::new(7.62 + f64::from(i) * 0.001, 51.96),
            )
            .with_value("Speed", None, 40.0 + f64::from(i))
            .with_value("Rpm", None, 2000.0)
        })
        .collect();
    store
        .create_track(Track::new(TRACK, "alice").with_name("Morning"), measurements)
        .unwrap();

    store
        .create_fueling(Fueling {
            id: FUELING.into(),
            owner: "alice".into(),
            time: start,
            fuel_type: FuelType::Diesel,
            volume: Quantity::new(40.0, "l"),
            cost: Some(Quantity::new(68.5, "EUR")),
            mileage: Quantity::new(12000.0, "km"),
            missed_fuel_stop: false,
            partial_fueling: false,
            comment: None,
            created: start,
            modified: start,
        })
        .unwrap();
    store
}

/// A GeoJSON track upload with `n` points.
pub fn track_upload(n: usize) -> Value {
    let features: Vec<Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [7.6 + i as f64 * 0.001, 51.9] },
                "properties": {
                    "time": format!("2024-06-01T10:00:{:02}Z", i),
                    "phenomena": { "Speed": { "value": 30.0 + i as f64 } }
                }
            })
        })
        .collect();
    serde_json::json!({
        "type": "FeatureCollection",
        "properties": { "name": "Upload" },
        "features": features,
    })
}
