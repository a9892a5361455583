//! Notification handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::Utc;

use assetdesk_core::error::AppError;
use assetdesk_core::types::NotificationId;
use assetdesk_service::notification::NotificationView;

use crate::dto::request::{
    CreateNotificationRequest, NotificationListQuery, UpdateNotificationRequest,
};
use crate::dto::response::{GenerateResponse, SuccessResponse};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/notifications?userId&isRead
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<Vec<NotificationView>>, AppError> {
    let notifications = state.notification_service.list(&query.into()).await?;
    Ok(Json(notifications))
}

/// POST /api/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateNotificationRequest>,
) -> Result<Json<NotificationView>, AppError> {
    let notification = state
        .notification_service
        .create(req.into_input(Utc::now()))
        .await?;
    Ok(Json(notification))
}

/// GET /api/notifications/{id}
pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<NotificationId>,
) -> Result<Json<NotificationView>, AppError> {
    let notification = state.notification_service.get(&id).await?;
    Ok(Json(notification))
}

/// PATCH /api/notifications/{id}
pub async fn update_notification(
    State(state): State<AppState>,
    Path(id): Path<NotificationId>,
    ValidatedJson(req): ValidatedJson<UpdateNotificationRequest>,
) -> Result<Json<NotificationView>, AppError> {
    let notification = state
        .notification_service
        .set_read(&id, req.is_read)
        .await?;
    Ok(Json(notification))
}

/// DELETE /api/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<NotificationId>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.notification_service.delete(&id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/notifications/generate
pub async fn generate_notifications(
    State(state): State<AppState>,
) -> Result<Json<GenerateResponse>, AppError> {
    let report = state.notification_engine.generate().await?;
    Ok(Json(report.into()))
}
