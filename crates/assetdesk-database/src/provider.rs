//! Store provider that wires up the configured backend.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};

use assetdesk_core::config::database::DatabaseConfig;
use assetdesk_core::error::AppError;
use assetdesk_core::result::AppResult;

use crate::connection;
use crate::memory::MemoryStore;
use crate::migration;
use crate::repositories::{
    AssetRepository, AssetTypeRepository, NotificationRepository, NotificationRuleRepository,
    UserRepository,
};
use crate::store::{
    AssetStore, AssetTypeStore, NotificationRuleStore, NotificationStore, UserStore,
};

/// One handle per record store, all backed by the same provider.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreProvider {
    /// Users.
    pub users: Arc<dyn UserStore>,
    /// Asset types.
    pub asset_types: Arc<dyn AssetTypeStore>,
    /// Assets and documents.
    pub assets: Arc<dyn AssetStore>,
    /// Notification rules.
    pub rules: Arc<dyn NotificationRuleStore>,
    /// Notifications.
    pub notifications: Arc<dyn NotificationStore>,
    /// The PostgreSQL pool, when that backend is in use.
    pool: Option<PgPool>,
}

impl StoreProvider {
    /// Create the stores selected by `config.provider`.
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.to_ascii_lowercase().as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL record store");
                let pool = connection::open_pool(config).await?;
                if config.auto_migrate {
                    migration::run_migrations(&pool).await?;
                }
                Ok(Self::from_pool(pool))
            }
            "memory" => {
                info!("Initializing in-memory record store");
                Ok(Self::from_memory(MemoryStore::with_default_asset_types()))
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Stores backed by an existing PostgreSQL pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            asset_types: Arc::new(AssetTypeRepository::new(pool.clone())),
            assets: Arc::new(AssetRepository::new(pool.clone())),
            rules: Arc::new(NotificationRuleRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Stores backed by one shared in-memory store (for testing).
    pub fn from_memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            asset_types: store.clone(),
            assets: store.clone(),
            rules: store.clone(),
            notifications: store,
            pool: None,
        }
    }

    /// Name of the active backend.
    pub fn backend(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    /// Check backend connectivity. The in-memory backend is always healthy.
    pub async fn health_check(&self) -> AppResult<bool> {
        let Some(pool) = &self.pool else {
            return Ok(true);
        };
        match connection::ping(pool).await {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(backend = self.backend(), error = %e, "Record store health check failed");
                Ok(false)
            }
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
        info!(backend = self.backend(), "Record store closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_provider_shares_one_store() {
        let config = DatabaseConfig::default();
        let stores = StoreProvider::new(&config).await.unwrap();
        assert_eq!(stores.backend(), "memory");
        assert!(stores.health_check().await.unwrap());

        let types = stores.asset_types.list().await.unwrap();
        assert_eq!(types.len(), 6);
        assert_eq!(types[0].name, "domain");
    }

    #[tokio::test]
    async fn test_unknown_provider_is_rejected() {
        let config = DatabaseConfig {
            provider: "mongo".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(StoreProvider::new(&config).await.is_err());
    }
}
