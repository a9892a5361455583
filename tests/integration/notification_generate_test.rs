//! Integration tests for rule-driven notification generation.

mod helpers;

use chrono::{TimeDelta, TimeZone, Utc};
use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, rfc3339};

#[tokio::test]
async fn test_generate_without_rules_creates_nothing() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/notifications/generate", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["count"], 0);
    assert_eq!(response.body["notifications"], json!([]));
}

#[tokio::test]
async fn test_generate_fans_out_and_is_idempotent() {
    let app = TestApp::new();
    let sato = app.create_user("Sato", "sato@example.com").await;
    let suzuki = app.create_user("Suzuki", "suzuki@example.com").await;

    let warranty = rfc3339(Utc::now() + TimeDelta::days(30));
    app.create_asset("Laptop A", "hardware", &sato, json!({ "warrantyExpiryDate": warranty }))
        .await;
    app.create_asset("Laptop B", "software", &sato, json!({ "warrantyExpiryDate": warranty }))
        .await;
    app.create_rule("all", "warranty_expiry", 30, json!(format!("{sato},{suzuki}")))
        .await;

    let first = app.request("POST", "/api/notifications/generate", None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["count"], 4);

    let created = first.body["notifications"].as_array().unwrap();
    assert!(created.iter().all(|n| n["type"] == "warranty_expiry"));
    assert!(created.iter().all(|n| n["isRead"] == false));
    assert!(
        created[0]["title"]
            .as_str()
            .unwrap()
            .starts_with("Warranty expiry in 30 days")
    );

    let second = app.request("POST", "/api/notifications/generate", None).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["count"], 0);

    let all = app.request("GET", "/api/notifications", None).await;
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn test_match_window_bounds() {
    let app = TestApp::new();
    let user = app.create_user("Sato", "sato@example.com").await;

    let target = Utc::now() + TimeDelta::days(30);
    let early = rfc3339(target - TimeDelta::hours(11));
    let late = rfc3339(target + TimeDelta::hours(13));
    let inside = app
        .create_asset("Inside", "subscription", &user, json!({ "renewalDate": early }))
        .await;
    app.create_asset("Outside", "subscription", &user, json!({ "renewalDate": late }))
        .await;
    app.create_rule("subscription", "renewal_due", 30, json!([user.clone()]))
        .await;

    let response = app.request("POST", "/api/notifications/generate", None).await;

    assert_eq!(response.body["count"], 1);
    assert_eq!(response.body["notifications"][0]["assetId"], inside.as_str());
}

#[tokio::test]
async fn test_return_due_only_matches_rentals() {
    let app = TestApp::new();
    let user = app.create_user("Sato", "sato@example.com").await;

    let due = rfc3339(Utc::now() + TimeDelta::days(7));
    app.create_asset("Owned server", "hardware", &user, json!({ "renewalDate": due }))
        .await;
    let rental = app
        .create_asset("Rented projector", "rental", &user, json!({ "renewalDate": due }))
        .await;
    app.create_rule("hardware", "return_due", 7, json!([user.clone()]))
        .await;

    let response = app.request("POST", "/api/notifications/generate", None).await;

    assert_eq!(response.body["count"], 1);
    assert_eq!(response.body["notifications"][0]["assetId"], rental.as_str());
    assert_eq!(response.body["notifications"][0]["type"], "return_due");
}

#[tokio::test]
async fn test_inactive_assets_and_empty_recipients_are_skipped() {
    let app = TestApp::new();
    let user = app.create_user("Sato", "sato@example.com").await;

    let warranty = rfc3339(Utc::now() + TimeDelta::days(14));
    app.create_asset(
        "Disposed laptop",
        "hardware",
        &user,
        json!({ "warrantyExpiryDate": warranty, "status": "disposed" }),
    )
    .await;
    app.create_asset("Spare laptop", "hardware", &user, json!({ "warrantyExpiryDate": warranty }))
        .await;
    app.create_rule("hardware", "warranty_expiry", 14, json!(""))
        .await;

    let response = app.request("POST", "/api/notifications/generate", None).await;
    assert_eq!(response.body["count"], 0);

    app.create_rule("hardware", "warranty_expiry", 14, json!([user.clone()]))
        .await;
    let response = app.request("POST", "/api/notifications/generate", None).await;
    assert_eq!(response.body["count"], 1);
    let message = response.body["notifications"][0]["message"].as_str().unwrap();
    assert!(message.contains("Spare laptop"));
}

#[tokio::test]
async fn test_depreciation_matches_exact_day_only() {
    let app = TestApp::new();
    let user = app.create_user("Sato", "sato@example.com").await;

    let purchase = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    app.create_asset(
        "Workstation",
        "hardware",
        &user,
        json!({ "purchaseDate": rfc3339(purchase), "depreciationPeriod": 36 }),
    )
    .await;
    app.create_rule("all", "depreciation_complete", 30, json!([user.clone()]))
        .await;

    let engine = &app.state.notification_engine;
    for (day, expected) in [(1, 0), (3, 0), (2, 1)] {
        let today = Utc.with_ymd_and_hms(2025, 12, day, 0, 0, 0).unwrap();
        let report = engine.generate_at(today).await.unwrap();
        assert_eq!(report.count, expected, "run on 2025-12-{day:02}");
    }
}

#[tokio::test]
async fn test_generated_notifications_can_be_listed_and_read() {
    let app = TestApp::new();
    let user = app.create_user("Sato", "sato@example.com").await;
    let other = app.create_user("Suzuki", "suzuki@example.com").await;

    let renewal = rfc3339(Utc::now() + TimeDelta::days(60));
    let asset = app
        .create_asset("example.com", "domain", &user, json!({ "renewalDate": renewal }))
        .await;
    app.create_rule("domain", "renewal_due", 60, json!([user.clone(), other.clone()]))
        .await;
    app.request("POST", "/api/notifications/generate", None).await;

    let mine = app
        .request("GET", &format!("/api/notifications?userId={user}"), None)
        .await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.len(), 1);
    assert_eq!(mine.body[0]["asset"]["id"], asset.as_str());
    assert_eq!(mine.body[0]["asset"]["name"], "example.com");
    assert_eq!(mine.body[0]["user"]["email"], "sato@example.com");

    let id = mine.body[0]["id"].as_str().unwrap().to_string();
    let patched = app
        .request(
            "PATCH",
            &format!("/api/notifications/{id}"),
            Some(json!({ "isRead": true })),
        )
        .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["isRead"], true);

    let unread = app.request("GET", "/api/notifications?isRead=false", None).await;
    assert_eq!(unread.len(), 1);
    assert_eq!(unread.body[0]["userId"], other.as_str());
}
