//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use chrono::{DateTime, TimeDelta, Utc};
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use assetdesk_api::AppState;
use assetdesk_core::config::AppConfig;
use assetdesk_database::{MemoryStore, StoreProvider};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for driving services directly
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub fn new() -> Self {
        let stores = StoreProvider::from_memory(MemoryStore::with_default_asset_types());
        let state = AppState::new(AppConfig::default(), stores);
        let router = assetdesk_api::build_app(state.clone());

        Self { router, state }
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a user and return its id
    pub async fn create_user(&self, name: &str, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/users",
                Some(json!({ "name": name, "email": email, "role": "user" })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.id()
    }

    /// Look up a seeded asset type id by name
    pub async fn asset_type_id(&self, name: &str) -> String {
        let response = self.request("GET", "/api/asset-types", None).await;
        response
            .body
            .as_array()
            .and_then(|types| types.iter().find(|t| t["name"] == name))
            .and_then(|t| t["id"].as_str())
            .unwrap_or_else(|| panic!("asset type '{name}' not seeded"))
            .to_string()
    }

    /// Create an asset of the named type; `extra` fields override the defaults
    pub async fn create_asset(&self, name: &str, type_name: &str, user: &str, extra: Value) -> String {
        let mut body = json!({
            "name": name,
            "assetTypeId": self.asset_type_id(type_name).await,
            "purchaseDate": rfc3339(Utc::now() - TimeDelta::days(100)),
            "purchasedById": user,
            "currentUserId": user,
        });
        if let (Some(target), Some(fields)) = (body.as_object_mut(), extra.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }

        let response = self.request("POST", "/api/assets", Some(body)).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.id()
    }

    /// Create a notification rule and return its id
    pub async fn create_rule(&self, asset_type: &str, event_type: &str, days: i32, users: Value) -> String {
        let response = self
            .request(
                "POST",
                "/api/notification-rules",
                Some(json!({
                    "assetType": asset_type,
                    "eventType": event_type,
                    "daysInAdvance": days,
                    "notifyUsers": users,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.id()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `id` field of the body
    pub fn id(&self) -> String {
        self.body["id"]
            .as_str()
            .expect("No id in response body")
            .to_string()
    }

    /// Length of a JSON array body
    pub fn len(&self) -> usize {
        self.body.as_array().map(Vec::len).unwrap_or(0)
    }
}

/// Format a timestamp the way clients send it
pub fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339()
}
