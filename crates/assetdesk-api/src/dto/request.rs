//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use assetdesk_core::types::{AssetId, AssetTypeId, UserId};
use assetdesk_entity::asset::{AssetInput, AssetStatus};
use assetdesk_entity::notification::{
    CreateNotification, NotificationEventType, NotificationFilter, NotificationRuleInput,
    RecipientList,
};
use assetdesk_entity::user::{CreateUser, UpdateUser, UserRole};

/// Create or update user request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    /// Role (defaults to `user`).
    #[serde(default)]
    pub role: UserRole,
}

impl From<UserRequest> for CreateUser {
    fn from(req: UserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role: req.role,
        }
    }
}

impl From<UserRequest> for UpdateUser {
    fn from(req: UserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role: req.role,
        }
    }
}

/// Create or fully replace an asset.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssetRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub serial_number: Option<String>,
    pub asset_type_id: AssetTypeId,
    pub purchase_date: DateTime<Utc>,
    #[validate(range(min = 0.0, message = "Purchase price must not be negative"))]
    pub purchase_price: Option<f64>,
    #[serde(default = "default_currency")]
    #[validate(length(min = 1, max = 8, message = "Currency is required"))]
    pub currency: String,
    pub purchased_by_id: UserId,
    pub current_user_id: UserId,
    #[serde(default)]
    pub status: AssetStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub warranty_expiry_date: Option<DateTime<Utc>>,
    #[validate(range(min = 0, message = "Depreciation period must not be negative"))]
    pub depreciation_period: Option<i32>,
    pub renewal_date: Option<DateTime<Utc>>,
    pub license_key: Option<String>,
    pub tags: Option<String>,
}

fn default_currency() -> String {
    "JPY".to_string()
}

impl From<AssetRequest> for AssetInput {
    fn from(req: AssetRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            serial_number: req.serial_number,
            asset_type_id: req.asset_type_id,
            purchase_date: req.purchase_date,
            purchase_price: req.purchase_price,
            currency: req.currency,
            purchased_by_id: req.purchased_by_id,
            current_user_id: req.current_user_id,
            status: req.status,
            location: req.location,
            notes: req.notes,
            warranty_expiry_date: req.warranty_expiry_date,
            depreciation_period: req.depreciation_period,
            renewal_date: req.renewal_date,
            license_key: req.license_key,
            tags: req.tags,
        }
    }
}

/// Create or fully replace a notification rule.
///
/// `notifyUsers` may be a JSON array or a comma-joined string.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRuleRequest {
    #[validate(length(min = 1, message = "assetType is required"))]
    pub asset_type: String,
    pub event_type: NotificationEventType,
    #[validate(range(
        min = 1,
        max = 36_500,
        message = "daysInAdvance must be between 1 and 36500"
    ))]
    pub days_in_advance: i32,
    #[serde(default)]
    pub notify_users: RecipientList,
    #[serde(default = "enabled")]
    pub email_enabled: bool,
    #[serde(default = "enabled")]
    pub app_enabled: bool,
    #[serde(default = "enabled")]
    pub active: bool,
}

fn enabled() -> bool {
    true
}

impl From<NotificationRuleRequest> for NotificationRuleInput {
    fn from(req: NotificationRuleRequest) -> Self {
        Self {
            asset_type: req.asset_type.trim().to_string(),
            event_type: req.event_type,
            days_in_advance: req.days_in_advance,
            notify_users: req.notify_users,
            email_enabled: req.email_enabled,
            app_enabled: req.app_enabled,
            active: req.active,
        }
    }
}

/// Manually insert a notification.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    pub asset_id: AssetId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub event_type: NotificationEventType,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub scheduled_date: DateTime<Utc>,
    /// Defaults to the time of the request.
    pub sent_date: Option<DateTime<Utc>>,
}

impl CreateNotificationRequest {
    /// Convert to the store input, stamping `sentDate` if absent.
    pub fn into_input(self, now: DateTime<Utc>) -> CreateNotification {
        CreateNotification {
            asset_id: self.asset_id,
            user_id: self.user_id,
            event_type: self.event_type,
            title: self.title,
            message: self.message,
            is_read: self.is_read,
            scheduled_date: self.scheduled_date,
            sent_date: self.sent_date.unwrap_or(now),
        }
    }
}

/// Toggle the read flag of a notification.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationRequest {
    pub is_read: bool,
}

/// Query parameters for `GET /api/notifications`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListQuery {
    /// Only notifications for this user.
    pub user_id: Option<String>,
    /// Only read (`true`) or unread (`false`) notifications.
    pub is_read: Option<bool>,
}

impl From<NotificationListQuery> for NotificationFilter {
    fn from(query: NotificationListQuery) -> Self {
        Self {
            user_id: query
                .user_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .map(UserId::from),
            is_read: query.is_read,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_request_defaults_and_recipients() {
        let req: NotificationRuleRequest = serde_json::from_value(serde_json::json!({
            "assetType": " hardware ",
            "eventType": "warranty_expiry",
            "daysInAdvance": 30,
            "notifyUsers": "u1, u2"
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let input = NotificationRuleInput::from(req);
        assert_eq!(input.asset_type, "hardware");
        assert_eq!(input.notify_users.to_joined(), "u1,u2");
        assert!(input.email_enabled && input.app_enabled && input.active);
    }

    #[test]
    fn test_rule_request_rejects_unknown_event_type() {
        let result: Result<NotificationRuleRequest, _> = serde_json::from_value(serde_json::json!({
            "assetType": "all",
            "eventType": "birthday",
            "daysInAdvance": 30
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_rule_request_rejects_zero_days() {
        let req: NotificationRuleRequest = serde_json::from_value(serde_json::json!({
            "assetType": "all",
            "eventType": "renewal_due",
            "daysInAdvance": 0,
            "notifyUsers": ["u1"]
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rule_request_rejects_days_beyond_bound() {
        let req: NotificationRuleRequest = serde_json::from_value(serde_json::json!({
            "assetType": "all",
            "eventType": "renewal_due",
            "daysInAdvance": 200_000_000,
            "notifyUsers": ["u1"]
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_user_request_email_validation() {
        let req = UserRequest {
            name: "Taro".to_string(),
            email: "not-an-email".to_string(),
            role: UserRole::User,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_list_query_drops_blank_user() {
        let filter = NotificationFilter::from(NotificationListQuery {
            user_id: Some("  ".to_string()),
            is_read: Some(false),
        });
        assert!(filter.user_id.is_none());
        assert_eq!(filter.is_read, Some(false));
    }
}
