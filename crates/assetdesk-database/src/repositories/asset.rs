//! Asset repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};

use assetdesk_core::result::AppResult;
use assetdesk_core::types::{AssetId, UserId};
use assetdesk_entity::asset::{Asset, AssetEventFilter, AssetInput, AssetListFilter};
use assetdesk_entity::document::Document;

use super::db_error;
use crate::store::AssetStore;

const SELECT_ASSETS: &str =
    "SELECT a.* FROM assets a JOIN asset_types t ON t.id = a.asset_type_id WHERE TRUE";

/// Repository for assets and their documents.
#[derive(Debug, Clone)]
pub struct AssetRepository {
    pool: PgPool,
}

impl AssetRepository {
    /// Create a new asset repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssetStore for AssetRepository {
    async fn list(&self, filter: &AssetListFilter) -> AppResult<Vec<Asset>> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_ASSETS);

        if let Some(term) = filter.search_term() {
            let term = term.to_lowercase();
            query
                .push(" AND (POSITION(")
                .push_bind(term.clone())
                .push(" IN LOWER(a.name)) > 0 OR POSITION(")
                .push_bind(term.clone())
                .push(" IN LOWER(COALESCE(a.serial_number, ''))) > 0 OR POSITION(")
                .push_bind(term)
                .push(" IN LOWER(COALESCE(a.description, ''))) > 0)");
        }
        if let Some(type_name) = filter.asset_type_name() {
            query.push(" AND t.name = ").push_bind(type_name.to_string());
        }
        if let Some(user) = filter.user() {
            query
                .push(" AND (a.purchased_by_id = ")
                .push_bind(user.to_string())
                .push(" OR a.current_user_id = ")
                .push_bind(user.to_string())
                .push(")");
        }
        query.push(" ORDER BY a.updated_at DESC");

        query
            .build_query_as::<Asset>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list assets", e))
    }

    async fn find_by_id(&self, id: &AssetId) -> AppResult<Option<Asset>> {
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find asset", e))
    }

    async fn find_many(&self, ids: &[AssetId]) -> AppResult<Vec<Asset>> {
        let ids: Vec<&str> = ids.iter().map(AssetId::as_str).collect();
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load assets", e))
    }

    async fn find_for_event(&self, filter: &AssetEventFilter) -> AppResult<Vec<Asset>> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_ASSETS);
        query.push(" AND a.status = ").push_bind(filter.status);

        if let Some(type_name) = &filter.asset_type_name {
            query.push(" AND t.name = ").push_bind(type_name.clone());
        }
        if let Some((field, window)) = &filter.date_field {
            query
                .push(" AND a.")
                .push(field.column())
                .push(" BETWEEN ")
                .push_bind(window.start)
                .push(" AND ")
                .push_bind(window.end);
        }
        if filter.require_depreciation {
            query.push(" AND a.depreciation_period IS NOT NULL");
        }
        query.push(" ORDER BY a.created_at ASC");

        query
            .build_query_as::<Asset>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find assets for event", e))
    }

    async fn count_by_user(&self, user_id: &UserId) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM assets WHERE purchased_by_id = $1 OR current_user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count assets by user", e))
    }

    async fn documents(&self, asset_id: &AssetId) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE asset_id = $1 ORDER BY created_at ASC",
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list documents", e))
    }

    async fn create(&self, input: AssetInput) -> AppResult<Asset> {
        let asset = input.into_asset(AssetId::new(), Utc::now());
        sqlx::query_as::<_, Asset>(
            "INSERT INTO assets (id, name, description, serial_number, asset_type_id, \
             purchase_date, purchase_price, currency, purchased_by_id, current_user_id, status, \
             location, notes, warranty_expiry_date, depreciation_period, renewal_date, \
             license_key, tags, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19, $20) RETURNING *",
        )
        .bind(&asset.id)
        .bind(&asset.name)
        .bind(&asset.description)
        .bind(&asset.serial_number)
        .bind(&asset.asset_type_id)
        .bind(asset.purchase_date)
        .bind(asset.purchase_price)
        .bind(&asset.currency)
        .bind(&asset.purchased_by_id)
        .bind(&asset.current_user_id)
        .bind(asset.status)
        .bind(&asset.location)
        .bind(&asset.notes)
        .bind(asset.warranty_expiry_date)
        .bind(asset.depreciation_period)
        .bind(asset.renewal_date)
        .bind(&asset.license_key)
        .bind(&asset.tags)
        .bind(asset.created_at)
        .bind(asset.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create asset", e))
    }

    async fn update(&self, id: &AssetId, input: AssetInput) -> AppResult<Option<Asset>> {
        sqlx::query_as::<_, Asset>(
            "UPDATE assets SET name = $2, description = $3, serial_number = $4, \
             asset_type_id = $5, purchase_date = $6, purchase_price = $7, currency = $8, \
             purchased_by_id = $9, current_user_id = $10, status = $11, location = $12, \
             notes = $13, warranty_expiry_date = $14, depreciation_period = $15, \
             renewal_date = $16, license_key = $17, tags = $18, updated_at = $19 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.serial_number)
        .bind(&input.asset_type_id)
        .bind(input.purchase_date)
        .bind(input.purchase_price)
        .bind(&input.currency)
        .bind(&input.purchased_by_id)
        .bind(&input.current_user_id)
        .bind(input.status)
        .bind(&input.location)
        .bind(&input.notes)
        .bind(input.warranty_expiry_date)
        .bind(input.depreciation_period)
        .bind(input.renewal_date)
        .bind(&input.license_key)
        .bind(&input.tags)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update asset", e))
    }

    async fn delete(&self, id: &AssetId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete asset", e))?;
        Ok(result.rows_affected() > 0)
    }
}
