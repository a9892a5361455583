//! User management handlers.

use axum::Json;
use axum::extract::{Path, State};

use assetdesk_core::error::AppError;
use assetdesk_core::types::UserId;
use assetdesk_entity::user::User;

use crate::dto::request::UserRequest;
use crate::dto::response::SuccessResponse;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.user_service.list().await?;
    Ok(Json(users))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UserRequest>,
) -> Result<Json<User>, AppError> {
    let user = state.user_service.create(req.into()).await?;
    Ok(Json(user))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>, AppError> {
    let user = state.user_service.get(&id).await?;
    Ok(Json(user))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    ValidatedJson(req): ValidatedJson<UserRequest>,
) -> Result<Json<User>, AppError> {
    let user = state.user_service.update(&id, req.into()).await?;
    Ok(Json(user))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.user_service.delete(&id).await?;
    Ok(Json(SuccessResponse::ok()))
}
