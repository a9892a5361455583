//! Notification rule entity model.

use assetdesk_core::AppError;
use assetdesk_core::types::NotificationRuleId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::event_type::NotificationEventType;
use super::recipients::RecipientList;

/// Rule `asset_type` value that matches every asset type.
pub const ALL_ASSET_TYPES: &str = "all";

/// Upper bound for `days_in_advance` (one hundred years).
pub const MAX_DAYS_IN_ADVANCE: i32 = 36_500;

/// A configured trigger: "notify these users N days before event E on
/// assets of type T".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRule {
    /// Unique rule identifier.
    pub id: NotificationRuleId,
    /// Asset type name, or `"all"`.
    pub asset_type: String,
    /// Lifecycle event watched.
    pub event_type: NotificationEventType,
    /// How many days before the event to notify. Always at least 1.
    pub days_in_advance: i32,
    /// Who gets notified.
    #[sqlx(try_from = "String")]
    pub notify_users: RecipientList,
    /// Stored for the UI; no email is ever sent.
    pub email_enabled: bool,
    /// Whether in-app notifications are wanted.
    pub app_enabled: bool,
    /// Inactive rules are skipped by the generator.
    pub active: bool,
    /// When the rule was created.
    pub created_at: DateTime<Utc>,
    /// When the rule was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Every writable rule field. Used for both creation and full update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRuleInput {
    pub asset_type: String,
    pub event_type: NotificationEventType,
    pub days_in_advance: i32,
    pub notify_users: RecipientList,
    pub email_enabled: bool,
    pub app_enabled: bool,
    pub active: bool,
}

impl NotificationRuleInput {
    /// Reject values the generator cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.asset_type.trim().is_empty() {
            return Err(AppError::validation("assetType must not be empty"));
        }
        if !(1..=MAX_DAYS_IN_ADVANCE).contains(&self.days_in_advance) {
            return Err(AppError::validation(format!(
                "daysInAdvance must be between 1 and {MAX_DAYS_IN_ADVANCE}, got {}",
                self.days_in_advance
            )));
        }
        self.notify_users.validate()
    }

    /// Materialize a new rule row from this input.
    pub fn into_rule(self, id: NotificationRuleId, now: DateTime<Utc>) -> NotificationRule {
        NotificationRule {
            id,
            asset_type: self.asset_type,
            event_type: self.event_type,
            days_in_advance: self.days_in_advance,
            notify_users: self.notify_users,
            email_enabled: self.email_enabled,
            app_enabled: self.app_enabled,
            active: self.active,
            created_at: now,
            updated_at: now,
        }
    }
}
