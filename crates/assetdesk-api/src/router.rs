//! Route definitions for the AssetDesk HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` router with every domain's routes and the shared state.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(asset_routes())
        .merge(rule_routes())
        .merge(notification_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// User CRUD
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
}

/// Asset types and asset CRUD
fn asset_routes() -> Router<AppState> {
    Router::new()
        .route("/asset-types", get(handlers::asset::list_asset_types))
        .route(
            "/assets",
            get(handlers::asset::list_assets).post(handlers::asset::create_asset),
        )
        .route(
            "/assets/{id}",
            get(handlers::asset::get_asset)
                .put(handlers::asset::update_asset)
                .delete(handlers::asset::delete_asset),
        )
}

/// Notification rule CRUD
fn rule_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notification-rules",
            get(handlers::rule::list_rules).post(handlers::rule::create_rule),
        )
        .route(
            "/notification-rules/{id}",
            get(handlers::rule::get_rule)
                .put(handlers::rule::update_rule)
                .delete(handlers::rule::delete_rule),
        )
}

/// Notifications and the generation trigger
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications)
                .post(handlers::notification::create_notification),
        )
        .route(
            "/notifications/generate",
            post(handlers::notification::generate_notifications),
        )
        .route(
            "/notifications/{id}",
            get(handlers::notification::get_notification)
                .patch(handlers::notification::update_notification)
                .delete(handlers::notification::delete_notification),
        )
}
