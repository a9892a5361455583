//! Asset CRUD with related records.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use assetdesk_core::error::AppError;
use assetdesk_core::types::{AssetId, AssetTypeId, UserId};
use assetdesk_database::store::{AssetStore, AssetTypeStore, UserStore};
use assetdesk_entity::asset::{Asset, AssetInput, AssetListFilter};
use assetdesk_entity::asset_type::AssetType;
use assetdesk_entity::document::Document;
use assetdesk_entity::user::User;

/// An asset as shown in the listing, with its related records and the
/// days left until its nearest deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetListItem {
    #[serde(flatten)]
    pub asset: Asset,
    pub asset_type: Option<AssetType>,
    pub purchased_by: Option<User>,
    pub current_user: Option<User>,
    /// Days until warranty expiry, else until renewal, rounded up.
    pub days_until_expiry: Option<i64>,
}

/// An asset with every related record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDetail {
    #[serde(flatten)]
    pub asset: Asset,
    pub asset_type: Option<AssetType>,
    pub purchased_by: Option<User>,
    pub current_user: Option<User>,
    pub documents: Vec<Document>,
}

/// Manages assets.
#[derive(Debug, Clone)]
pub struct AssetService {
    /// Asset store.
    assets: Arc<dyn AssetStore>,
    /// Asset type store.
    asset_types: Arc<dyn AssetTypeStore>,
    /// User store.
    users: Arc<dyn UserStore>,
}

impl AssetService {
    /// Creates a new asset service.
    pub fn new(
        assets: Arc<dyn AssetStore>,
        asset_types: Arc<dyn AssetTypeStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            assets,
            asset_types,
            users,
        }
    }

    /// Lists assets matching `filter`, most recently updated first.
    pub async fn list(
        &self,
        filter: &AssetListFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<AssetListItem>, AppError> {
        let assets = self.assets.list(filter).await?;
        let types = self.type_index().await?;

        let mut user_ids: Vec<UserId> = assets
            .iter()
            .flat_map(|a| [a.purchased_by_id.clone(), a.current_user_id.clone()])
            .collect();
        user_ids.sort();
        user_ids.dedup();
        let users: HashMap<UserId, User> = self
            .users
            .find_many(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        Ok(assets
            .into_iter()
            .map(|asset| AssetListItem {
                asset_type: types.get(&asset.asset_type_id).cloned(),
                purchased_by: users.get(&asset.purchased_by_id).cloned(),
                current_user: users.get(&asset.current_user_id).cloned(),
                days_until_expiry: asset.days_until_expiry(now),
                asset,
            })
            .collect())
    }

    /// Gets one asset with its related records.
    pub async fn get(&self, id: &AssetId) -> Result<AssetDetail, AppError> {
        let asset = self
            .assets
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Asset not found"))?;
        self.detail(asset).await
    }

    /// Creates an asset.
    pub async fn create(&self, input: AssetInput) -> Result<AssetDetail, AppError> {
        self.validate(&input).await?;
        let asset = self.assets.create(input).await?;
        info!(asset_id = %asset.id, name = %asset.name, "Asset created");
        self.detail(asset).await
    }

    /// Replaces every writable field of an asset.
    pub async fn update(&self, id: &AssetId, input: AssetInput) -> Result<AssetDetail, AppError> {
        self.validate(&input).await?;
        let asset = self
            .assets
            .update(id, input)
            .await?
            .ok_or_else(|| AppError::not_found("Asset not found"))?;
        info!(asset_id = %asset.id, status = %asset.status, "Asset updated");
        self.detail(asset).await
    }

    /// Deletes an asset together with its documents and notifications.
    pub async fn delete(&self, id: &AssetId) -> Result<(), AppError> {
        if !self.assets.delete(id).await? {
            return Err(AppError::not_found("Asset not found"));
        }
        info!(asset_id = %id, "Asset deleted");
        Ok(())
    }

    async fn validate(&self, input: &AssetInput) -> Result<(), AppError> {
        if input.name.trim().is_empty() {
            return Err(AppError::validation("name must not be empty"));
        }
        if input.currency.trim().is_empty() {
            return Err(AppError::validation("currency must not be empty"));
        }
        if input.depreciation_period.is_some_and(|months| months < 0) {
            return Err(AppError::validation("depreciationPeriod must not be negative"));
        }
        if self.asset_types.find_by_id(&input.asset_type_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "Asset type '{}' does not exist",
                input.asset_type_id
            )));
        }
        for user in [&input.purchased_by_id, &input.current_user_id] {
            if self.users.find_by_id(user).await?.is_none() {
                return Err(AppError::validation(format!("User '{user}' does not exist")));
            }
        }
        Ok(())
    }

    async fn detail(&self, asset: Asset) -> Result<AssetDetail, AppError> {
        let asset_type = self.asset_types.find_by_id(&asset.asset_type_id).await?;
        let purchased_by = self.users.find_by_id(&asset.purchased_by_id).await?;
        let current_user = self.users.find_by_id(&asset.current_user_id).await?;
        let documents = self.assets.documents(&asset.id).await?;
        Ok(AssetDetail {
            asset,
            asset_type,
            purchased_by,
            current_user,
            documents,
        })
    }

    async fn type_index(&self) -> Result<HashMap<AssetTypeId, AssetType>, AppError> {
        Ok(self
            .asset_types
            .list()
            .await?
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdesk_core::ErrorKind;
    use assetdesk_database::MemoryStore;
    use assetdesk_entity::asset::AssetStatus;
    use assetdesk_entity::user::{CreateUser, UserRole};
    use chrono::{TimeDelta, TimeZone};

    async fn setup() -> (AssetService, Arc<MemoryStore>, User, AssetType) {
        let store = Arc::new(MemoryStore::with_default_asset_types());
        let service = AssetService::new(store.clone(), store.clone(), store.clone());
        let user = UserStore::create(
            store.as_ref(),
            CreateUser {
                name: "Sato".to_string(),
                email: "sato@example.com".to_string(),
                role: UserRole::User,
            },
        )
        .await
        .unwrap();
        let hardware = AssetTypeStore::find_by_name(store.as_ref(), "hardware")
            .await
            .unwrap()
            .unwrap();
        (service, store, user, hardware)
    }

    fn input(name: &str, user: &User, asset_type: &AssetType) -> AssetInput {
        AssetInput {
            name: name.to_string(),
            description: Some("Developer laptop".to_string()),
            serial_number: Some("FVFXC2JQ".to_string()),
            asset_type_id: asset_type.id.clone(),
            purchase_date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            purchase_price: Some(240000.0),
            currency: "JPY".to_string(),
            purchased_by_id: user.id.clone(),
            current_user_id: user.id.clone(),
            status: AssetStatus::Active,
            location: Some("Tokyo".to_string()),
            notes: None,
            warranty_expiry_date: None,
            depreciation_period: Some(36),
            renewal_date: None,
            license_key: None,
            tags: Some("PC,dev".to_string()),
        }
    }

    #[tokio::test]
    async fn test_list_computes_days_until_expiry() {
        let (service, _store, user, hardware) = setup().await;
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();

        let mut with_warranty = input("MacBook", &user, &hardware);
        with_warranty.warranty_expiry_date = Some(now + TimeDelta::hours(24 * 9 + 1));
        service.create(with_warranty).await.unwrap();
        service.create(input("Monitor", &user, &hardware)).await.unwrap();

        let items = service.list(&AssetListFilter::default(), now).await.unwrap();
        assert_eq!(items.len(), 2);
        let macbook = items.iter().find(|i| i.asset.name == "MacBook").unwrap();
        assert_eq!(macbook.days_until_expiry, Some(10));
        assert_eq!(macbook.asset_type.as_ref().unwrap().name, "hardware");
        assert_eq!(macbook.purchased_by.as_ref().unwrap().email, "sato@example.com");
        let monitor = items.iter().find(|i| i.asset.name == "Monitor").unwrap();
        assert_eq!(monitor.days_until_expiry, None);
    }

    #[tokio::test]
    async fn test_list_filters_by_search_and_type() {
        let (service, _store, user, hardware) = setup().await;
        service.create(input("MacBook Pro", &user, &hardware)).await.unwrap();
        service.create(input("Dell Monitor", &user, &hardware)).await.unwrap();

        let filter = AssetListFilter {
            search: Some("macbook".to_string()),
            ..AssetListFilter::default()
        };
        let items = service.list(&filter, Utc::now()).await.unwrap();
        assert_eq!(items.len(), 1);

        let filter = AssetListFilter {
            asset_type: Some("software".to_string()),
            ..AssetListFilter::default()
        };
        assert!(service.list(&filter, Utc::now()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_type() {
        let (service, _store, user, mut hardware) = setup().await;
        hardware.id = AssetTypeId::from("missing");
        let err = service
            .create(input("Ghost", &user, &hardware))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (service, ..) = setup().await;
        let err = service.get(&AssetId::from("missing")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
