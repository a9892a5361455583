//! In-memory implementation of every record store trait.
//!
//! All tables live behind one `tokio::sync::RwLock`, so each trait method
//! observes and mutates a consistent snapshot. Referential checks mirror
//! the PostgreSQL schema: dangling references are rejected with
//! `Conflict`, and deleting an asset cascades to its documents and
//! notifications.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use assetdesk_core::error::AppError;
use assetdesk_core::result::AppResult;
use assetdesk_core::types::{
    AssetId, AssetTypeId, NotificationId, NotificationRuleId, UserId,
};
use assetdesk_entity::asset::{Asset, AssetEventFilter, AssetInput, AssetListFilter};
use assetdesk_entity::asset_type::{AssetType, DEFAULT_ASSET_TYPES};
use assetdesk_entity::document::Document;
use assetdesk_entity::notification::{
    CreateNotification, Notification, NotificationEventType, NotificationFilter,
    NotificationRule, NotificationRuleInput,
};
use assetdesk_entity::user::{CreateUser, UpdateUser, User};

use crate::store::{
    AssetStore, AssetTypeStore, NotificationRuleStore, NotificationStore, UserStore,
};

/// Rows kept in insertion order.
#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    asset_types: Vec<AssetType>,
    assets: Vec<Asset>,
    documents: Vec<Document>,
    rules: Vec<NotificationRule>,
    notifications: Vec<Notification>,
}

impl Tables {
    fn type_name(&self, id: &AssetTypeId) -> &str {
        self.asset_types
            .iter()
            .find(|t| &t.id == id)
            .map(|t| t.name.as_str())
            .unwrap_or_default()
    }

    fn user_exists(&self, id: &UserId) -> bool {
        self.users.iter().any(|u| &u.id == id)
    }

    fn email_taken(&self, email: &str, except: Option<&UserId>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(&u.id) != except)
    }

    fn check_asset_references(&self, input: &AssetInput) -> AppResult<()> {
        if !self.asset_types.iter().any(|t| t.id == input.asset_type_id) {
            return Err(AppError::conflict(format!(
                "Asset type '{}' does not exist",
                input.asset_type_id
            )));
        }
        for user in [&input.purchased_by_id, &input.current_user_id] {
            if !self.user_exists(user) {
                return Err(AppError::conflict(format!("User '{user}' does not exist")));
            }
        }
        Ok(())
    }

    fn has_recent(
        &self,
        asset_id: &AssetId,
        user_id: &UserId,
        event_type: NotificationEventType,
        since: DateTime<Utc>,
    ) -> bool {
        self.notifications.iter().any(|n| {
            &n.asset_id == asset_id
                && &n.user_id == user_id
                && n.event_type == event_type
                && n.created_at >= since
        })
    }

    fn insert_notification(&mut self, input: CreateNotification) -> AppResult<Notification> {
        if !self.assets.iter().any(|a| a.id == input.asset_id) {
            return Err(AppError::conflict(format!(
                "Asset '{}' does not exist",
                input.asset_id
            )));
        }
        let notification = input.into_notification(NotificationId::new(), Utc::now());
        self.notifications.push(notification.clone());
        Ok(notification)
    }
}

/// Newest-first ordering that keeps later insertions ahead on ties.
fn newest_first<T: Clone>(rows: &[T], key: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by_key(|row| std::cmp::Reverse(key(row)));
    out
}

/// In-memory record store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the default asset types.
    pub fn with_default_asset_types() -> Self {
        let now = Utc::now();
        let asset_types = DEFAULT_ASSET_TYPES
            .iter()
            .map(|(name, description, period)| {
                AssetType::new(*name, Some((*description).to_string()), *period, now)
            })
            .collect();
        Self {
            tables: Arc::new(RwLock::new(Tables {
                asset_types,
                ..Tables::default()
            })),
        }
    }

    /// Attach a document to an asset.
    pub async fn insert_document(&self, document: Document) -> AppResult<Document> {
        let mut tables = self.tables.write().await;
        if !tables.assets.iter().any(|a| a.id == document.asset_id) {
            return Err(AppError::conflict(format!(
                "Asset '{}' does not exist",
                document.asset_id
            )));
        }
        tables.documents.push(document.clone());
        Ok(document)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users = tables.users.clone();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create(&self, input: CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&input.email, None) {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                input.email
            )));
        }
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: input.name,
            email: input.email,
            role: input.role,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &UserId, input: UpdateUser) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&input.email, Some(id)) {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                input.email
            )));
        }
        let Some(user) = tables.users.iter_mut().find(|u| &u.id == id) else {
            return Ok(None);
        };
        user.name = input.name;
        user.email = input.email;
        user.role = input.role;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &UserId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let referenced = tables
            .assets
            .iter()
            .any(|a| &a.purchased_by_id == id || &a.current_user_id == id);
        if referenced {
            return Err(AppError::conflict(format!(
                "User '{id}' is still referenced by assets"
            )));
        }
        let before = tables.users.len();
        tables.users.retain(|u| &u.id != id);
        Ok(tables.users.len() < before)
    }
}

#[async_trait]
impl AssetTypeStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<AssetType>> {
        let tables = self.tables.read().await;
        let mut types = tables.asset_types.clone();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn find_by_id(&self, id: &AssetTypeId) -> AppResult<Option<AssetType>> {
        let tables = self.tables.read().await;
        Ok(tables.asset_types.iter().find(|t| &t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<AssetType>> {
        let tables = self.tables.read().await;
        Ok(tables.asset_types.iter().find(|t| t.name == name).cloned())
    }

    async fn create(&self, asset_type: AssetType) -> AppResult<AssetType> {
        let mut tables = self.tables.write().await;
        if tables.asset_types.iter().any(|t| t.name == asset_type.name) {
            return Err(AppError::conflict(format!(
                "Asset type '{}' already exists",
                asset_type.name
            )));
        }
        tables.asset_types.push(asset_type.clone());
        Ok(asset_type)
    }
}

#[async_trait]
impl AssetStore for MemoryStore {
    async fn list(&self, filter: &AssetListFilter) -> AppResult<Vec<Asset>> {
        let tables = self.tables.read().await;
        let matching: Vec<Asset> = tables
            .assets
            .iter()
            .filter(|a| filter.matches(a, tables.type_name(&a.asset_type_id)))
            .cloned()
            .collect();
        Ok(newest_first(&matching, |a| a.updated_at))
    }

    async fn find_by_id(&self, id: &AssetId) -> AppResult<Option<Asset>> {
        let tables = self.tables.read().await;
        Ok(tables.assets.iter().find(|a| &a.id == id).cloned())
    }

    async fn find_many(&self, ids: &[AssetId]) -> AppResult<Vec<Asset>> {
        let tables = self.tables.read().await;
        Ok(tables
            .assets
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }

    async fn find_for_event(&self, filter: &AssetEventFilter) -> AppResult<Vec<Asset>> {
        let tables = self.tables.read().await;
        Ok(tables
            .assets
            .iter()
            .filter(|a| filter.matches(a, tables.type_name(&a.asset_type_id)))
            .cloned()
            .collect())
    }

    async fn count_by_user(&self, user_id: &UserId) -> AppResult<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .assets
            .iter()
            .filter(|a| &a.purchased_by_id == user_id || &a.current_user_id == user_id)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn documents(&self, asset_id: &AssetId) -> AppResult<Vec<Document>> {
        let tables = self.tables.read().await;
        Ok(tables
            .documents
            .iter()
            .filter(|d| &d.asset_id == asset_id)
            .cloned()
            .collect())
    }

    async fn create(&self, input: AssetInput) -> AppResult<Asset> {
        let mut tables = self.tables.write().await;
        tables.check_asset_references(&input)?;
        let asset = input.into_asset(AssetId::new(), Utc::now());
        tables.assets.push(asset.clone());
        Ok(asset)
    }

    async fn update(&self, id: &AssetId, input: AssetInput) -> AppResult<Option<Asset>> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables.assets.iter().position(|a| &a.id == id) else {
            return Ok(None);
        };
        tables.check_asset_references(&input)?;
        let created_at = tables.assets[index].created_at;
        let mut asset = input.into_asset(id.clone(), Utc::now());
        asset.created_at = created_at;
        tables.assets[index] = asset.clone();
        Ok(Some(asset))
    }

    async fn delete(&self, id: &AssetId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.assets.len();
        tables.assets.retain(|a| &a.id != id);
        if tables.assets.len() == before {
            return Ok(false);
        }
        tables.documents.retain(|d| &d.asset_id != id);
        tables.notifications.retain(|n| &n.asset_id != id);
        Ok(true)
    }
}

#[async_trait]
impl NotificationRuleStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<NotificationRule>> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.rules, |r| r.created_at))
    }

    async fn find_active(&self) -> AppResult<Vec<NotificationRule>> {
        let tables = self.tables.read().await;
        Ok(tables.rules.iter().filter(|r| r.active).cloned().collect())
    }

    async fn find_by_id(&self, id: &NotificationRuleId) -> AppResult<Option<NotificationRule>> {
        let tables = self.tables.read().await;
        Ok(tables.rules.iter().find(|r| &r.id == id).cloned())
    }

    async fn create(&self, input: NotificationRuleInput) -> AppResult<NotificationRule> {
        let mut tables = self.tables.write().await;
        let rule = input.into_rule(NotificationRuleId::new(), Utc::now());
        tables.rules.push(rule.clone());
        Ok(rule)
    }

    async fn update(
        &self,
        id: &NotificationRuleId,
        input: NotificationRuleInput,
    ) -> AppResult<Option<NotificationRule>> {
        let mut tables = self.tables.write().await;
        let Some(rule) = tables.rules.iter_mut().find(|r| &r.id == id) else {
            return Ok(None);
        };
        let created_at = rule.created_at;
        *rule = input.into_rule(id.clone(), Utc::now());
        rule.created_at = created_at;
        Ok(Some(rule.clone()))
    }

    async fn delete(&self, id: &NotificationRuleId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.rules.len();
        tables.rules.retain(|r| &r.id != id);
        Ok(tables.rules.len() < before)
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn list(&self, filter: &NotificationFilter) -> AppResult<Vec<Notification>> {
        let tables = self.tables.read().await;
        let matching: Vec<Notification> = tables
            .notifications
            .iter()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect();
        Ok(newest_first(&matching, |n| n.created_at))
    }

    async fn find_by_id(&self, id: &NotificationId) -> AppResult<Option<Notification>> {
        let tables = self.tables.read().await;
        Ok(tables.notifications.iter().find(|n| &n.id == id).cloned())
    }

    async fn exists(
        &self,
        asset_id: &AssetId,
        user_id: &UserId,
        event_type: NotificationEventType,
        since: DateTime<Utc>,
    ) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.has_recent(asset_id, user_id, event_type, since))
    }

    async fn create(&self, input: CreateNotification) -> AppResult<Notification> {
        let mut tables = self.tables.write().await;
        tables.insert_notification(input)
    }

    async fn create_unless_recent(
        &self,
        input: CreateNotification,
        since: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        let mut tables = self.tables.write().await;
        if tables.has_recent(&input.asset_id, &input.user_id, input.event_type, since) {
            debug!(
                asset_id = %input.asset_id,
                user_id = %input.user_id,
                event_type = %input.event_type,
                "Recent notification exists, skipping insert"
            );
            return Ok(None);
        }
        tables.insert_notification(input).map(Some)
    }

    async fn set_read(
        &self,
        id: &NotificationId,
        is_read: bool,
    ) -> AppResult<Option<Notification>> {
        let mut tables = self.tables.write().await;
        let Some(notification) = tables.notifications.iter_mut().find(|n| &n.id == id) else {
            return Ok(None);
        };
        notification.is_read = is_read;
        notification.updated_at = Utc::now();
        Ok(Some(notification.clone()))
    }

    async fn delete(&self, id: &NotificationId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.notifications.len();
        tables.notifications.retain(|n| &n.id != id);
        Ok(tables.notifications.len() < before)
    }
}
