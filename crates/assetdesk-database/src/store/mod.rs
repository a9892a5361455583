//! Traits for pluggable record store backends (PostgreSQL or in-memory).
//!
//! Implementations stamp ids and `created_at`/`updated_at` themselves;
//! callers pass only the writable fields.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use assetdesk_core::result::AppResult;
use assetdesk_core::types::{
    AssetId, AssetTypeId, NotificationId, NotificationRuleId, UserId,
};
use assetdesk_entity::asset::{Asset, AssetEventFilter, AssetInput, AssetListFilter};
use assetdesk_entity::asset_type::AssetType;
use assetdesk_entity::document::Document;
use assetdesk_entity::notification::{
    CreateNotification, Notification, NotificationEventType, NotificationFilter,
    NotificationRule, NotificationRuleInput,
};
use assetdesk_entity::user::{CreateUser, UpdateUser, User};

/// Users.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// All users ordered by name.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>>;

    /// Find a user by exact email address.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find several users at once. Unknown ids are skipped.
    async fn find_many(&self, ids: &[UserId]) -> AppResult<Vec<User>>;

    /// Insert a user. Fails with `Conflict` if the email is taken.
    async fn create(&self, input: CreateUser) -> AppResult<User>;

    /// Replace a user's fields. `None` if the user does not exist.
    async fn update(&self, id: &UserId, input: UpdateUser) -> AppResult<Option<User>>;

    /// Delete a user. `false` if it did not exist. Fails with `Conflict`
    /// while assets still reference the user.
    async fn delete(&self, id: &UserId) -> AppResult<bool>;
}

/// Asset types.
#[async_trait]
pub trait AssetTypeStore: Send + Sync + std::fmt::Debug + 'static {
    /// All asset types ordered by name.
    async fn list(&self) -> AppResult<Vec<AssetType>>;

    /// Find an asset type by primary key.
    async fn find_by_id(&self, id: &AssetTypeId) -> AppResult<Option<AssetType>>;

    /// Find an asset type by its unique name.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<AssetType>>;

    /// Insert an asset type. Fails with `Conflict` if the name is taken.
    async fn create(&self, asset_type: AssetType) -> AppResult<AssetType>;
}

/// Assets and their documents.
#[async_trait]
pub trait AssetStore: Send + Sync + std::fmt::Debug + 'static {
    /// Assets matching `filter`, most recently updated first.
    async fn list(&self, filter: &AssetListFilter) -> AppResult<Vec<Asset>>;

    /// Find an asset by primary key.
    async fn find_by_id(&self, id: &AssetId) -> AppResult<Option<Asset>>;

    /// Find several assets at once. Unknown ids are skipped.
    async fn find_many(&self, ids: &[AssetId]) -> AppResult<Vec<Asset>>;

    /// Candidate assets for one notification rule.
    async fn find_for_event(&self, filter: &AssetEventFilter) -> AppResult<Vec<Asset>>;

    /// Number of assets purchased by or assigned to `user_id`.
    async fn count_by_user(&self, user_id: &UserId) -> AppResult<i64>;

    /// Documents attached to an asset, oldest first.
    async fn documents(&self, asset_id: &AssetId) -> AppResult<Vec<Document>>;

    /// Insert an asset.
    async fn create(&self, input: AssetInput) -> AppResult<Asset>;

    /// Replace every writable field. `None` if the asset does not exist.
    async fn update(&self, id: &AssetId, input: AssetInput) -> AppResult<Option<Asset>>;

    /// Delete an asset with its documents and notifications. `false` if it
    /// did not exist.
    async fn delete(&self, id: &AssetId) -> AppResult<bool>;
}

/// Notification rules.
#[async_trait]
pub trait NotificationRuleStore: Send + Sync + std::fmt::Debug + 'static {
    /// All rules, newest first.
    async fn list(&self) -> AppResult<Vec<NotificationRule>>;

    /// Rules with `active == true`, oldest first.
    async fn find_active(&self) -> AppResult<Vec<NotificationRule>>;

    /// Find a rule by primary key.
    async fn find_by_id(&self, id: &NotificationRuleId) -> AppResult<Option<NotificationRule>>;

    /// Insert a rule.
    async fn create(&self, input: NotificationRuleInput) -> AppResult<NotificationRule>;

    /// Replace every writable field. `None` if the rule does not exist.
    async fn update(
        &self,
        id: &NotificationRuleId,
        input: NotificationRuleInput,
    ) -> AppResult<Option<NotificationRule>>;

    /// Delete a rule. `false` if it did not exist.
    async fn delete(&self, id: &NotificationRuleId) -> AppResult<bool>;
}

/// Generated and manually inserted notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Notifications matching `filter`, newest first.
    async fn list(&self, filter: &NotificationFilter) -> AppResult<Vec<Notification>>;

    /// Find a notification by primary key.
    async fn find_by_id(&self, id: &NotificationId) -> AppResult<Option<Notification>>;

    /// Whether a notification for this (asset, user, type) was created at or
    /// after `since`.
    ///
    /// Read-only form of the dedup check for callers outside the generator,
    /// which uses [`Self::create_unless_recent`] so the check and insert
    /// cannot race. Both backends evaluate the same predicate for the two
    /// methods.
    async fn exists(
        &self,
        asset_id: &AssetId,
        user_id: &UserId,
        event_type: NotificationEventType,
        since: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Insert unconditionally.
    async fn create(&self, input: CreateNotification) -> AppResult<Notification>;

    /// Insert unless [`Self::exists`] holds for the same (asset, user, type)
    /// and `since`. The check and the insert are atomic with respect to other
    /// callers of this method. Returns `None` when suppressed.
    async fn create_unless_recent(
        &self,
        input: CreateNotification,
        since: DateTime<Utc>,
    ) -> AppResult<Option<Notification>>;

    /// Set the read flag. `None` if the notification does not exist.
    async fn set_read(&self, id: &NotificationId, is_read: bool)
        -> AppResult<Option<Notification>>;

    /// Delete a notification. `false` if it did not exist.
    async fn delete(&self, id: &NotificationId) -> AppResult<bool>;
}
