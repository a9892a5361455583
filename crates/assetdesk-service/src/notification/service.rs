//! Notification records: listing, manual creation, read state.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use assetdesk_core::error::AppError;
use assetdesk_core::types::{AssetId, NotificationId, UserId};
use assetdesk_database::store::{AssetStore, NotificationStore, UserStore};
use assetdesk_entity::asset::AssetSummary;
use assetdesk_entity::notification::{CreateNotification, Notification, NotificationFilter};
use assetdesk_entity::user::UserSummary;

/// A notification with its asset and recipient summaries.
///
/// The summaries are `null` when the referenced record does not exist
/// (recipients are not checked against the user table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationView {
    /// The notification itself, flattened into the JSON object.
    #[serde(flatten)]
    pub notification: Notification,
    /// `{ id, name }` of the asset.
    pub asset: Option<AssetSummary>,
    /// `{ id, name, email }` of the recipient.
    pub user: Option<UserSummary>,
}

/// Reads and maintains notification records.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification store.
    notifications: Arc<dyn NotificationStore>,
    /// Asset store, for summaries.
    assets: Arc<dyn AssetStore>,
    /// User store, for summaries.
    users: Arc<dyn UserStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        assets: Arc<dyn AssetStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            notifications,
            assets,
            users,
        }
    }

    /// Lists notifications, newest first.
    pub async fn list(&self, filter: &NotificationFilter) -> Result<Vec<NotificationView>, AppError> {
        let notifications = self.notifications.list(filter).await?;
        self.attach_summaries(notifications).await
    }

    /// Gets one notification.
    pub async fn get(&self, id: &NotificationId) -> Result<NotificationView, AppError> {
        let notification = self
            .notifications
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;
        self.view(notification).await
    }

    /// Inserts a notification by hand.
    pub async fn create(&self, input: CreateNotification) -> Result<NotificationView, AppError> {
        if input.title.trim().is_empty() {
            return Err(AppError::validation("title must not be empty"));
        }
        if self.assets.find_by_id(&input.asset_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "Asset '{}' does not exist",
                input.asset_id
            )));
        }
        let notification = self.notifications.create(input).await?;
        info!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            "Notification created manually"
        );
        self.view(notification).await
    }

    /// Marks a notification read or unread.
    pub async fn set_read(
        &self,
        id: &NotificationId,
        is_read: bool,
    ) -> Result<NotificationView, AppError> {
        let notification = self
            .notifications
            .set_read(id, is_read)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;
        self.view(notification).await
    }

    /// Deletes a notification.
    pub async fn delete(&self, id: &NotificationId) -> Result<(), AppError> {
        if !self.notifications.delete(id).await? {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }

    async fn view(&self, notification: Notification) -> Result<NotificationView, AppError> {
        let mut views = self.attach_summaries(vec![notification]).await?;
        views
            .pop()
            .ok_or_else(|| AppError::internal("Notification view went missing"))
    }

    /// Join asset and user summaries with one lookup per store.
    async fn attach_summaries(
        &self,
        notifications: Vec<Notification>,
    ) -> Result<Vec<NotificationView>, AppError> {
        let mut asset_ids: Vec<AssetId> = notifications.iter().map(|n| n.asset_id.clone()).collect();
        asset_ids.sort();
        asset_ids.dedup();
        let mut user_ids: Vec<UserId> = notifications.iter().map(|n| n.user_id.clone()).collect();
        user_ids.sort();
        user_ids.dedup();

        let assets: HashMap<AssetId, AssetSummary> = self
            .assets
            .find_many(&asset_ids)
            .await?
            .into_iter()
            .map(|a| (a.id.clone(), a.summary()))
            .collect();
        let users: HashMap<UserId, UserSummary> = self
            .users
            .find_many(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u.summary()))
            .collect();

        Ok(notifications
            .into_iter()
            .map(|notification| NotificationView {
                asset: assets.get(&notification.asset_id).cloned(),
                user: users.get(&notification.user_id).cloned(),
                notification,
            })
            .collect())
    }
}
