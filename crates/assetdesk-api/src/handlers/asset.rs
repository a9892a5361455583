//! Asset and asset type handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::Utc;

use assetdesk_core::error::AppError;
use assetdesk_core::types::AssetId;
use assetdesk_entity::asset::AssetListFilter;
use assetdesk_entity::asset_type::AssetType;
use assetdesk_service::asset::{AssetDetail, AssetListItem};

use crate::dto::request::AssetRequest;
use crate::dto::response::SuccessResponse;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/asset-types
pub async fn list_asset_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<AssetType>>, AppError> {
    let types = state.asset_type_service.list().await?;
    Ok(Json(types))
}

/// GET /api/assets?search&assetType&userId
pub async fn list_assets(
    State(state): State<AppState>,
    Query(filter): Query<AssetListFilter>,
) -> Result<Json<Vec<AssetListItem>>, AppError> {
    let items = state.asset_service.list(&filter, Utc::now()).await?;
    Ok(Json(items))
}

/// POST /api/assets
pub async fn create_asset(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AssetRequest>,
) -> Result<Json<AssetDetail>, AppError> {
    let asset = state.asset_service.create(req.into()).await?;
    Ok(Json(asset))
}

/// GET /api/assets/{id}
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
) -> Result<Json<AssetDetail>, AppError> {
    let asset = state.asset_service.get(&id).await?;
    Ok(Json(asset))
}

/// PUT /api/assets/{id}
pub async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
    ValidatedJson(req): ValidatedJson<AssetRequest>,
) -> Result<Json<AssetDetail>, AppError> {
    let asset = state.asset_service.update(&id, req.into()).await?;
    Ok(Json(asset))
}

/// DELETE /api/assets/{id}
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.asset_service.delete(&id).await?;
    Ok(Json(SuccessResponse::ok()))
}
