//! Notification rule handlers.

use axum::Json;
use axum::extract::{Path, State};

use assetdesk_core::error::AppError;
use assetdesk_core::types::NotificationRuleId;
use assetdesk_entity::notification::NotificationRule;

use crate::dto::request::NotificationRuleRequest;
use crate::dto::response::SuccessResponse;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/notification-rules
pub async fn list_rules(
    State(state): State<AppState>,
) -> Result<Json<Vec<NotificationRule>>, AppError> {
    let rules = state.rule_service.list().await?;
    Ok(Json(rules))
}

/// POST /api/notification-rules
pub async fn create_rule(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NotificationRuleRequest>,
) -> Result<Json<NotificationRule>, AppError> {
    let rule = state.rule_service.create(req.into()).await?;
    Ok(Json(rule))
}

/// GET /api/notification-rules/{id}
pub async fn get_rule(
    State(state): State<AppState>,
    Path(id): Path<NotificationRuleId>,
) -> Result<Json<NotificationRule>, AppError> {
    let rule = state.rule_service.get(&id).await?;
    Ok(Json(rule))
}

/// PUT /api/notification-rules/{id}
pub async fn update_rule(
    State(state): State<AppState>,
    Path(id): Path<NotificationRuleId>,
    ValidatedJson(req): ValidatedJson<NotificationRuleRequest>,
) -> Result<Json<NotificationRule>, AppError> {
    let rule = state.rule_service.update(&id, req.into()).await?;
    Ok(Json(rule))
}

/// DELETE /api/notification-rules/{id}
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<NotificationRuleId>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.rule_service.delete(&id).await?;
    Ok(Json(SuccessResponse::ok()))
}
