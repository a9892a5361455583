//! Integration tests for assets and asset types.

mod helpers;

use chrono::{TimeDelta, Utc};
use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, rfc3339};

#[tokio::test]
async fn test_asset_types_are_seeded_by_name() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/asset-types", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec!["domain", "hardware", "rental", "software", "ssl_certificate", "subscription"]
    );
}

#[tokio::test]
async fn test_create_and_get_asset_detail() {
    let app = TestApp::new();
    let user = app.create_user("Sato", "sato@example.com").await;
    let id = app
        .create_asset(
            "ThinkPad X1",
            "hardware",
            &user,
            json!({ "serialNumber": "SN-001", "purchasePrice": 250000.0 }),
        )
        .await;

    let response = app.request("GET", &format!("/api/assets/{id}"), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "ThinkPad X1");
    assert_eq!(response.body["currency"], "JPY");
    assert_eq!(response.body["status"], "active");
    assert_eq!(response.body["assetType"]["name"], "hardware");
    assert_eq!(response.body["purchasedBy"]["id"], user.as_str());
    assert_eq!(response.body["currentUser"]["name"], "Sato");
    assert_eq!(response.body["documents"], json!([]));
}

#[tokio::test]
async fn test_create_asset_with_unknown_type_is_rejected() {
    let app = TestApp::new();
    let user = app.create_user("Sato", "sato@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/assets",
            Some(json!({
                "name": "Mystery box",
                "assetTypeId": "no-such-type",
                "purchaseDate": rfc3339(Utc::now()),
                "purchasedById": user,
                "currentUserId": user,
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_reports_days_until_expiry() {
    let app = TestApp::new();
    let user = app.create_user("Sato", "sato@example.com").await;
    app.create_asset(
        "Warranty",
        "hardware",
        &user,
        json!({ "warrantyExpiryDate": rfc3339(Utc::now() + TimeDelta::days(10)) }),
    )
    .await;
    app.create_asset(
        "Renewal",
        "subscription",
        &user,
        json!({ "renewalDate": rfc3339(Utc::now() + TimeDelta::days(45)) }),
    )
    .await;
    app.create_asset("Undated", "software", &user, json!({})).await;

    let response = app.request("GET", "/api/assets", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.len(), 3);
    let days_for = |name: &str| {
        response
            .body
            .as_array()
            .unwrap()
            .iter()
            .find(|a| a["name"] == name)
            .map(|a| a["daysUntilExpiry"].clone())
            .unwrap()
    };
    assert_eq!(days_for("Warranty"), json!(10));
    assert_eq!(days_for("Renewal"), json!(45));
    assert_eq!(days_for("Undated"), json!(null));
}

#[tokio::test]
async fn test_list_filters() {
    let app = TestApp::new();
    let sato = app.create_user("Sato", "sato@example.com").await;
    let suzuki = app.create_user("Suzuki", "suzuki@example.com").await;
    app.create_asset("MacBook Pro", "hardware", &sato, json!({})).await;
    app.create_asset(
        "Office license",
        "software",
        &sato,
        json!({ "currentUserId": suzuki, "description": "Macro-enabled suite" }),
    )
    .await;
    app.create_asset("Monitor", "hardware", &suzuki, json!({})).await;

    let search = app.request("GET", "/api/assets?search=mac", None).await;
    assert_eq!(search.len(), 2);

    let typed = app
        .request("GET", "/api/assets?search=mac&assetType=hardware", None)
        .await;
    assert_eq!(typed.len(), 1);
    assert_eq!(typed.body[0]["name"], "MacBook Pro");

    let all_types = app.request("GET", "/api/assets?assetType=all", None).await;
    assert_eq!(all_types.len(), 3);

    let suzukis = app
        .request("GET", &format!("/api/assets?userId={suzuki}"), None)
        .await;
    assert_eq!(suzukis.len(), 2);
}

#[tokio::test]
async fn test_update_asset() {
    let app = TestApp::new();
    let user = app.create_user("Sato", "sato@example.com").await;
    let id = app.create_asset("Laptop", "hardware", &user, json!({})).await;
    let path = format!("/api/assets/{id}");

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({
                "name": "Laptop (returned)",
                "assetTypeId": app.asset_type_id("rental").await,
                "purchaseDate": rfc3339(Utc::now()),
                "purchasedById": user,
                "currentUserId": user,
                "status": "returned",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Laptop (returned)");
    assert_eq!(response.body["status"], "returned");
    assert_eq!(response.body["assetType"]["name"], "rental");

    let missing = app
        .request(
            "PUT",
            "/api/assets/no-such-asset",
            Some(json!({
                "name": "Ghost",
                "assetTypeId": app.asset_type_id("rental").await,
                "purchaseDate": rfc3339(Utc::now()),
                "purchasedById": user,
                "currentUserId": user,
            })),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_asset_cascades_notifications() {
    let app = TestApp::new();
    let user = app.create_user("Sato", "sato@example.com").await;
    let id = app.create_asset("Laptop", "hardware", &user, json!({})).await;

    let notification = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({
                "assetId": id,
                "userId": user,
                "type": "warranty_expiry",
                "title": "Manual reminder",
                "message": "Check the warranty",
                "scheduledDate": rfc3339(Utc::now() + TimeDelta::days(5)),
            })),
        )
        .await;
    assert_eq!(notification.status, StatusCode::OK);
    assert_eq!(notification.body["asset"]["name"], "Laptop");
    let notification_id = notification.id();

    let deleted = app.request("DELETE", &format!("/api/assets/{id}"), None).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.request("GET", &format!("/api/assets/{id}"), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let orphan = app
        .request("GET", &format!("/api/notifications/{notification_id}"), None)
        .await;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_backend() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "memory");
}
