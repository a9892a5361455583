//! Asset type lookups.

use std::sync::Arc;

use assetdesk_core::error::AppError;
use assetdesk_database::store::AssetTypeStore;
use assetdesk_entity::asset_type::AssetType;

/// Read access to asset types.
#[derive(Debug, Clone)]
pub struct AssetTypeService {
    asset_types: Arc<dyn AssetTypeStore>,
}

impl AssetTypeService {
    /// Creates a new asset type service.
    pub fn new(asset_types: Arc<dyn AssetTypeStore>) -> Self {
        Self { asset_types }
    }

    /// Lists all asset types ordered by name.
    pub async fn list(&self) -> Result<Vec<AssetType>, AppError> {
        self.asset_types.list().await
    }
}
