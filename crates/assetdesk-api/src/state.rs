//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use assetdesk_core::config::AppConfig;
use assetdesk_core::result::AppResult;
use assetdesk_database::StoreProvider;
use assetdesk_service::{
    AssetService, AssetTypeService, NotificationEngine, NotificationRuleService,
    NotificationService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Record stores for the configured backend
    pub stores: StoreProvider,

    // ── Services ─────────────────────────────────────────────
    /// User management
    pub user_service: Arc<UserService>,
    /// Asset type catalogue
    pub asset_type_service: Arc<AssetTypeService>,
    /// Asset management
    pub asset_service: Arc<AssetService>,
    /// Notification rule management
    pub rule_service: Arc<NotificationRuleService>,
    /// Notification listing and manual edits
    pub notification_service: Arc<NotificationService>,

    // ── Notifications ────────────────────────────────────────
    /// Rule-driven notification generator
    pub notification_engine: Arc<NotificationEngine>,
}

impl AppState {
    /// Wire every service on top of already-initialized stores.
    pub fn new(config: AppConfig, stores: StoreProvider) -> Self {
        let user_service = Arc::new(UserService::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.assets),
        ));
        let asset_type_service = Arc::new(AssetTypeService::new(Arc::clone(&stores.asset_types)));
        let asset_service = Arc::new(AssetService::new(
            Arc::clone(&stores.assets),
            Arc::clone(&stores.asset_types),
            Arc::clone(&stores.users),
        ));
        let rule_service = Arc::new(NotificationRuleService::new(Arc::clone(&stores.rules)));
        let notification_service = Arc::new(NotificationService::new(
            Arc::clone(&stores.notifications),
            Arc::clone(&stores.assets),
            Arc::clone(&stores.users),
        ));
        let notification_engine = Arc::new(NotificationEngine::new(
            Arc::clone(&stores.rules),
            Arc::clone(&stores.assets),
            Arc::clone(&stores.notifications),
            config.notifications,
        ));

        Self {
            config: Arc::new(config),
            stores,
            user_service,
            asset_type_service,
            asset_service,
            rule_service,
            notification_service,
            notification_engine,
        }
    }

    /// Open the configured backend and wire the services on top of it.
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let stores = StoreProvider::new(&config.database).await?;
        Ok(Self::new(config, stores))
    }
}
