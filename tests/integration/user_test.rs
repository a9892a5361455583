//! Integration tests for user management.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_create_and_list_users_by_name() {
    let app = TestApp::new();
    app.create_user("Suzuki", "suzuki@example.com").await;
    app.create_user("Sato", "sato@example.com").await;

    let response = app.request("GET", "/api/users", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.len(), 2);
    assert_eq!(response.body[0]["name"], "Sato");
    assert_eq!(response.body[1]["name"], "Suzuki");
    assert_eq!(response.body[0]["role"], "user");
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.create_user("Sato", "sato@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "name": "Another Sato", "email": "sato@example.com" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["message"], "This email address is already in use");
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "name": "Sato", "email": "not-an-email" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/users/does-not-exist", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user() {
    let app = TestApp::new();
    let sato = app.create_user("Sato", "sato@example.com").await;
    app.create_user("Suzuki", "suzuki@example.com").await;
    let path = format!("/api/users/{sato}");

    let taken = app
        .request(
            "PUT",
            &path,
            Some(json!({ "name": "Sato", "email": "suzuki@example.com", "role": "user" })),
        )
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);

    let updated = app
        .request(
            "PUT",
            &path,
            Some(json!({ "name": "Sato Taro", "email": "sato@example.com", "role": "admin" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["name"], "Sato Taro");
    assert_eq!(updated.body["role"], "admin");
}

#[tokio::test]
async fn test_delete_user_holding_assets_conflicts() {
    let app = TestApp::new();
    let holder = app.create_user("Sato", "sato@example.com").await;
    let free = app.create_user("Suzuki", "suzuki@example.com").await;
    app.create_asset("Laptop", "hardware", &holder, json!({})).await;

    let blocked = app
        .request("DELETE", &format!("/api/users/{holder}"), None)
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    let deleted = app.request("DELETE", &format!("/api/users/{free}"), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["success"], true);

    let remaining = app.request("GET", "/api/users", None).await;
    assert_eq!(remaining.len(), 1);
}
