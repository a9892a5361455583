//! The fixed set of lifecycle events a rule can watch for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::asset::AssetDateField;
use crate::asset_type::RENTAL_TYPE_NAME;

use super::rule::ALL_ASSET_TYPES;

/// Lifecycle event that a notification rule reacts to.
///
/// Each variant decides which asset date it inspects, how the rule's asset
/// type filter applies, and how the resulting notification is worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_event_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationEventType {
    /// The warranty is about to end.
    WarrantyExpiry,
    /// A subscription, domain or certificate is due for renewal.
    RenewalDue,
    /// A rental must be handed back.
    ReturnDue,
    /// The asset is about to be fully depreciated.
    DepreciationComplete,
}

impl NotificationEventType {
    /// Every event type, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::WarrantyExpiry,
        Self::RenewalDue,
        Self::ReturnDue,
        Self::DepreciationComplete,
    ];

    /// Return the wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WarrantyExpiry => "warranty_expiry",
            Self::RenewalDue => "renewal_due",
            Self::ReturnDue => "return_due",
            Self::DepreciationComplete => "depreciation_complete",
        }
    }

    /// Human-readable name of the deadline.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WarrantyExpiry => "Warranty expiry",
            Self::RenewalDue => "Renewal",
            Self::ReturnDue => "Return",
            Self::DepreciationComplete => "Depreciation completion",
        }
    }

    /// The asset date compared against the match window. Depreciation has
    /// no stored date and is computed from the purchase date instead.
    pub fn date_field(&self) -> Option<AssetDateField> {
        match self {
            Self::WarrantyExpiry => Some(AssetDateField::WarrantyExpiry),
            Self::RenewalDue | Self::ReturnDue => Some(AssetDateField::Renewal),
            Self::DepreciationComplete => None,
        }
    }

    /// The asset type name candidates must have, given the rule's setting.
    ///
    /// Return-due rules only ever apply to rentals, whatever the rule says.
    pub fn asset_type_filter(&self, rule_asset_type: &str) -> Option<String> {
        match self {
            Self::ReturnDue => Some(RENTAL_TYPE_NAME.to_string()),
            Self::WarrantyExpiry | Self::RenewalDue | Self::DepreciationComplete => {
                if rule_asset_type == ALL_ASSET_TYPES {
                    None
                } else {
                    Some(rule_asset_type.to_string())
                }
            }
        }
    }

    /// Whether candidates must carry a depreciation period.
    pub fn requires_depreciation(&self) -> bool {
        matches!(self, Self::DepreciationComplete)
    }

    /// Notification title for `asset_name` with `days` left.
    pub fn title(&self, asset_name: &str, days: i32) -> String {
        format!("{} in {days} days: {asset_name}", self.label())
    }

    /// Notification body for `asset_name` with `days` left.
    pub fn message(&self, asset_name: &str, days: i32) -> String {
        match self {
            Self::WarrantyExpiry => {
                format!("The warranty for asset \"{asset_name}\" expires in {days} days.")
            }
            Self::RenewalDue => {
                format!("Asset \"{asset_name}\" is due for renewal in {days} days.")
            }
            Self::ReturnDue => {
                format!("Rental asset \"{asset_name}\" must be returned in {days} days.")
            }
            Self::DepreciationComplete => {
                format!("Asset \"{asset_name}\" will be fully depreciated in {days} days.")
            }
        }
    }
}

impl fmt::Display for NotificationEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationEventType {
    type Err = assetdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                assetdesk_core::AppError::validation(format!(
                    "Invalid event type: '{s}'. Expected one of: warranty_expiry, renewal_due, return_due, depreciation_complete"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_rejects_unknown_tags() {
        assert_eq!(
            "renewal_due".parse::<NotificationEventType>().unwrap(),
            NotificationEventType::RenewalDue
        );
        assert!("lease_end".parse::<NotificationEventType>().is_err());
    }

    #[test]
    fn test_return_due_always_targets_rentals() {
        let kind = NotificationEventType::ReturnDue;
        assert_eq!(kind.asset_type_filter("hardware").as_deref(), Some("rental"));
        assert_eq!(kind.asset_type_filter("all").as_deref(), Some("rental"));
    }

    #[test]
    fn test_all_disables_type_filter() {
        let kind = NotificationEventType::WarrantyExpiry;
        assert_eq!(kind.asset_type_filter("all"), None);
        assert_eq!(kind.asset_type_filter("software").as_deref(), Some("software"));
    }

    #[test]
    fn test_templates_mention_asset_and_days() {
        for kind in NotificationEventType::ALL {
            let title = kind.title("Office 365", 14);
            let message = kind.message("Office 365", 14);
            assert!(title.contains("Office 365") && title.contains("14"));
            assert!(title.starts_with(kind.label()));
            assert!(message.contains("Office 365") && message.contains("14"));
        }
    }

    #[test]
    fn test_serde_uses_snake_case_tags() {
        let json = serde_json::to_string(&NotificationEventType::DepreciationComplete).unwrap();
        assert_eq!(json, "\"depreciation_complete\"");
        assert!(serde_json::from_str::<NotificationEventType>("\"unknown\"").is_err());
    }
}
