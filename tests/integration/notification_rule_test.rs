//! Integration tests for notification rule management.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_create_rule_accepts_array_or_joined_string() {
    let app = TestApp::new();

    let from_array = app
        .request(
            "POST",
            "/api/notification-rules",
            Some(json!({
                "assetType": "all",
                "eventType": "warranty_expiry",
                "daysInAdvance": 30,
                "notifyUsers": ["u1", "u2"],
            })),
        )
        .await;
    assert_eq!(from_array.status, StatusCode::OK);
    assert_eq!(from_array.body["notifyUsers"], json!(["u1", "u2"]));
    assert_eq!(from_array.body["active"], true);
    assert_eq!(from_array.body["emailEnabled"], true);

    let from_string = app
        .request(
            "POST",
            "/api/notification-rules",
            Some(json!({
                "assetType": "software",
                "eventType": "renewal_due",
                "daysInAdvance": 14,
                "notifyUsers": "u1, u3",
                "emailEnabled": false,
            })),
        )
        .await;
    assert_eq!(from_string.status, StatusCode::OK);
    assert_eq!(from_string.body["notifyUsers"], json!(["u1", "u3"]));
    assert_eq!(from_string.body["emailEnabled"], false);
}

#[tokio::test]
async fn test_create_rule_rejects_invalid_input() {
    let app = TestApp::new();

    let unknown_event = app
        .request(
            "POST",
            "/api/notification-rules",
            Some(json!({
                "assetType": "all",
                "eventType": "birthday",
                "daysInAdvance": 30,
            })),
        )
        .await;
    assert_eq!(unknown_event.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_event.body["error"], "VALIDATION_ERROR");

    let zero_days = app
        .request(
            "POST",
            "/api/notification-rules",
            Some(json!({
                "assetType": "all",
                "eventType": "warranty_expiry",
                "daysInAdvance": 0,
            })),
        )
        .await;
    assert_eq!(zero_days.status, StatusCode::BAD_REQUEST);

    let far_future = app
        .request(
            "POST",
            "/api/notification-rules",
            Some(json!({
                "assetType": "all",
                "eventType": "warranty_expiry",
                "daysInAdvance": 200_000_000,
                "notifyUsers": ["u1"],
            })),
        )
        .await;
    assert_eq!(far_future.status, StatusCode::BAD_REQUEST);

    let generated = app.request("POST", "/api/notifications/generate", None).await;
    assert_eq!(generated.status, StatusCode::OK);

    let listed = app.request("GET", "/api/notification-rules", None).await;
    assert_eq!(listed.len(), 0);
}

#[tokio::test]
async fn test_list_rules_newest_first() {
    let app = TestApp::new();
    let older = app
        .create_rule("all", "warranty_expiry", 30, json!(["u1"]))
        .await;
    let newer = app
        .create_rule("domain", "renewal_due", 60, json!(["u1"]))
        .await;

    let response = app.request("GET", "/api/notification-rules", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.len(), 2);
    assert_eq!(response.body[0]["id"], newer.as_str());
    assert_eq!(response.body[1]["id"], older.as_str());
}

#[tokio::test]
async fn test_update_and_delete_rule() {
    let app = TestApp::new();
    let id = app
        .create_rule("all", "warranty_expiry", 30, json!(["u1"]))
        .await;
    let path = format!("/api/notification-rules/{id}");

    let updated = app
        .request(
            "PUT",
            &path,
            Some(json!({
                "assetType": "hardware",
                "eventType": "depreciation_complete",
                "daysInAdvance": 90,
                "notifyUsers": ["u2"],
                "active": false,
            })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["assetType"], "hardware");
    assert_eq!(updated.body["eventType"], "depreciation_complete");
    assert_eq!(updated.body["daysInAdvance"], 90);
    assert_eq!(updated.body["active"], false);

    let fetched = app.request("GET", &path, None).await;
    assert_eq!(fetched.body["notifyUsers"], json!(["u2"]));

    let deleted = app.request("DELETE", &path, None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["success"], true);

    let missing = app.request("GET", &path, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_inactive_rule_does_not_generate() {
    let app = TestApp::new();
    let user = app.create_user("Sato", "sato@example.com").await;
    let warranty = helpers::rfc3339(chrono::Utc::now() + chrono::TimeDelta::days(30));
    app.create_asset("Laptop", "hardware", &user, json!({ "warrantyExpiryDate": warranty }))
        .await;
    let id = app
        .create_rule("all", "warranty_expiry", 30, json!([user.clone()]))
        .await;

    app.request(
        "PUT",
        &format!("/api/notification-rules/{id}"),
        Some(json!({
            "assetType": "all",
            "eventType": "warranty_expiry",
            "daysInAdvance": 30,
            "notifyUsers": [user],
            "active": false,
        })),
    )
    .await;

    let response = app.request("POST", "/api/notifications/generate", None).await;
    assert_eq!(response.body["count"], 0);
}
