//! Asset type repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use assetdesk_core::result::AppResult;
use assetdesk_core::types::AssetTypeId;
use assetdesk_entity::asset_type::AssetType;

use super::db_error;
use crate::store::AssetTypeStore;

/// Repository for asset types.
#[derive(Debug, Clone)]
pub struct AssetTypeRepository {
    pool: PgPool,
}

impl AssetTypeRepository {
    /// Create a new asset type repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssetTypeStore for AssetTypeRepository {
    async fn list(&self) -> AppResult<Vec<AssetType>> {
        sqlx::query_as::<_, AssetType>("SELECT * FROM asset_types ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list asset types", e))
    }

    async fn find_by_id(&self, id: &AssetTypeId) -> AppResult<Option<AssetType>> {
        sqlx::query_as::<_, AssetType>("SELECT * FROM asset_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find asset type", e))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<AssetType>> {
        sqlx::query_as::<_, AssetType>("SELECT * FROM asset_types WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find asset type by name", e))
    }

    async fn create(&self, asset_type: AssetType) -> AppResult<AssetType> {
        sqlx::query_as::<_, AssetType>(
            "INSERT INTO asset_types (id, name, description, default_depreciation_period, \
             required_fields, optional_fields, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&asset_type.id)
        .bind(&asset_type.name)
        .bind(&asset_type.description)
        .bind(asset_type.default_depreciation_period)
        .bind(&asset_type.required_fields)
        .bind(&asset_type.optional_fields)
        .bind(asset_type.created_at)
        .bind(asset_type.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create asset type", e))
    }
}
