//! Notification entity model.

use assetdesk_core::types::{AssetId, NotificationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::event_type::NotificationEventType;

/// An in-app notification about an asset, addressed to one user.
///
/// `user_id` is not checked against the user table; rules may name
/// recipients that do not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The asset concerned.
    pub asset_id: AssetId,
    /// The recipient.
    pub user_id: UserId,
    /// Event that triggered this notification.
    #[serde(rename = "type")]
    pub event_type: NotificationEventType,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// The event date the notification warns about.
    pub scheduled_date: DateTime<Utc>,
    /// When the notification was issued.
    pub sent_date: DateTime<Utc>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the notification was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification is still unread.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// Data required to insert a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotification {
    pub asset_id: AssetId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub event_type: NotificationEventType,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub scheduled_date: DateTime<Utc>,
    pub sent_date: DateTime<Utc>,
}

impl CreateNotification {
    /// Materialize a new notification row from this input.
    pub fn into_notification(self, id: NotificationId, now: DateTime<Utc>) -> Notification {
        Notification {
            id,
            asset_id: self.asset_id,
            user_id: self.user_id,
            event_type: self.event_type,
            title: self.title,
            message: self.message,
            is_read: self.is_read,
            scheduled_date: self.scheduled_date,
            sent_date: self.sent_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Filters for listing notifications. Absent fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFilter {
    /// Only this recipient.
    pub user_id: Option<UserId>,
    /// Only read (`true`) or unread (`false`) notifications.
    pub is_read: Option<bool>,
}

impl NotificationFilter {
    /// Evaluate the filter against a notification.
    pub fn matches(&self, notification: &Notification) -> bool {
        self.user_id
            .as_ref()
            .is_none_or(|user| *user == notification.user_id)
            && self.is_read.is_none_or(|read| read == notification.is_read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_event_type_serializes_as_type() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let notification = CreateNotification {
            asset_id: AssetId::from("a1"),
            user_id: UserId::from("u1"),
            event_type: NotificationEventType::ReturnDue,
            title: "t".to_string(),
            message: "m".to_string(),
            is_read: false,
            scheduled_date: now,
            sent_date: now,
        }
        .into_notification(NotificationId::from("n1"), now);

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["type"], "return_due");
        assert_eq!(json["isRead"], false);
        assert!(notification.is_unread());
    }
}
