//! Asset entity model.

use assetdesk_core::types::{AssetId, AssetTypeId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::lifecycle;
use super::status::AssetStatus;

/// A tracked organizational asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Unique asset identifier.
    pub id: AssetId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Manufacturer serial number.
    pub serial_number: Option<String>,
    /// The asset's type.
    pub asset_type_id: AssetTypeId,
    /// When the asset was bought.
    pub purchase_date: DateTime<Utc>,
    /// Price paid, in `currency`.
    pub purchase_price: Option<f64>,
    /// ISO currency code.
    pub currency: String,
    /// Who bought it.
    pub purchased_by_id: UserId,
    /// Who currently holds it.
    pub current_user_id: UserId,
    /// Lifecycle status.
    pub status: AssetStatus,
    /// Physical or logical location.
    pub location: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// End of the warranty.
    pub warranty_expiry_date: Option<DateTime<Utc>>,
    /// Depreciation period in months.
    pub depreciation_period: Option<i32>,
    /// Renewal date for subscriptions and domains, return date for rentals.
    pub renewal_date: Option<DateTime<Utc>>,
    /// Software license key.
    pub license_key: Option<String>,
    /// Comma-separated tags.
    pub tags: Option<String>,
    /// When the asset was created.
    pub created_at: DateTime<Utc>,
    /// When the asset was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    /// Whether the asset is in active use.
    pub fn is_active(&self) -> bool {
        self.status == AssetStatus::Active
    }

    /// The nearest lifecycle deadline: warranty expiry, falling back to the
    /// renewal date.
    pub fn expiry_date(&self) -> Option<DateTime<Utc>> {
        self.warranty_expiry_date.or(self.renewal_date)
    }

    /// Days from `now` until [`Self::expiry_date`], rounded up.
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expiry_date()
            .map(|deadline| lifecycle::days_until(deadline, now))
    }

    /// When straight-line depreciation finishes: the purchase date plus
    /// `depreciation_period` calendar months. `None` without a period or
    /// with a negative one.
    pub fn depreciation_end_date(&self) -> Option<DateTime<Utc>> {
        let months = u32::try_from(self.depreciation_period?).ok()?;
        lifecycle::add_months(self.purchase_date, months)
    }

    /// `{ id, name }` view embedded in notification responses.
    pub fn summary(&self) -> AssetSummary {
        AssetSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// The `{ id, name }` view of an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    /// Asset identifier.
    pub id: AssetId,
    /// Display name.
    pub name: String,
}

/// Every writable asset field. Used for both creation and full update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInput {
    pub name: String,
    pub description: Option<String>,
    pub serial_number: Option<String>,
    pub asset_type_id: AssetTypeId,
    pub purchase_date: DateTime<Utc>,
    pub purchase_price: Option<f64>,
    pub currency: String,
    pub purchased_by_id: UserId,
    pub current_user_id: UserId,
    pub status: AssetStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub warranty_expiry_date: Option<DateTime<Utc>>,
    pub depreciation_period: Option<i32>,
    pub renewal_date: Option<DateTime<Utc>>,
    pub license_key: Option<String>,
    pub tags: Option<String>,
}

impl AssetInput {
    /// Materialize a new asset row from this input.
    pub fn into_asset(self, id: AssetId, now: DateTime<Utc>) -> Asset {
        Asset {
            id,
            name: self.name,
            description: self.description,
            serial_number: self.serial_number,
            asset_type_id: self.asset_type_id,
            purchase_date: self.purchase_date,
            purchase_price: self.purchase_price,
            currency: self.currency,
            purchased_by_id: self.purchased_by_id,
            current_user_id: self.current_user_id,
            status: self.status,
            location: self.location,
            notes: self.notes,
            warranty_expiry_date: self.warranty_expiry_date,
            depreciation_period: self.depreciation_period,
            renewal_date: self.renewal_date,
            license_key: self.license_key,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn asset() -> Asset {
        let purchase = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        AssetInput {
            name: "Laptop".to_string(),
            description: None,
            serial_number: None,
            asset_type_id: AssetTypeId::from("hw"),
            purchase_date: purchase,
            purchase_price: Some(1200.0),
            currency: "JPY".to_string(),
            purchased_by_id: UserId::from("u1"),
            current_user_id: UserId::from("u2"),
            status: AssetStatus::Active,
            location: None,
            notes: None,
            warranty_expiry_date: None,
            depreciation_period: Some(36),
            renewal_date: None,
            license_key: None,
            tags: None,
        }
        .into_asset(AssetId::from("a1"), purchase)
    }

    #[test]
    fn test_depreciation_end_date() {
        let expected = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(asset().depreciation_end_date(), Some(expected));
    }

    #[test]
    fn test_expiry_prefers_warranty_over_renewal() {
        let mut asset = asset();
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(asset.days_until_expiry(now), None);

        asset.renewal_date = Some(now + chrono::TimeDelta::days(10));
        assert_eq!(asset.days_until_expiry(now), Some(10));

        asset.warranty_expiry_date = Some(now + chrono::TimeDelta::hours(36));
        assert_eq!(asset.days_until_expiry(now), Some(2));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(asset()).unwrap();
        assert_eq!(json["assetTypeId"], "hw");
        assert_eq!(json["depreciationPeriod"], 36);
    }
}
