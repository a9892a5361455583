//! Asset type entity model.

use assetdesk_core::types::AssetTypeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Name of the asset type that return-due rules always target.
pub const RENTAL_TYPE_NAME: &str = "rental";

/// Asset types every installation starts with:
/// `(name, description, default depreciation period in months)`.
pub const DEFAULT_ASSET_TYPES: [(&str, &str, Option<i32>); 6] = [
    ("hardware", "Hardware (PCs, servers, peripherals)", Some(36)),
    ("software", "Software (perpetual licenses)", None),
    ("subscription", "Subscriptions (software and services renewed periodically)", None),
    ("domain", "Domain names (annual contracts)", None),
    ("ssl_certificate", "SSL certificates", None),
    (RENTAL_TYPE_NAME, "Rentals (equipment with a return date)", None),
];

/// A category of asset such as `hardware`, `subscription` or `rental`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AssetType {
    /// Unique asset type identifier.
    pub id: AssetTypeId,
    /// Unique machine name, matched by notification rules.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Depreciation period in months suggested for new assets of this type.
    pub default_depreciation_period: Option<i32>,
    /// Comma-separated list of asset fields the UI requires.
    pub required_fields: Option<String>,
    /// Comma-separated list of asset fields the UI offers.
    pub optional_fields: Option<String>,
    /// When the asset type was created.
    pub created_at: DateTime<Utc>,
    /// When the asset type was last updated.
    pub updated_at: DateTime<Utc>,
}

impl AssetType {
    /// Build a new asset type row stamped with `now`.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        default_depreciation_period: Option<i32>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AssetTypeId::new(),
            name: name.into(),
            description,
            default_depreciation_period,
            required_fields: None,
            optional_fields: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether assets of this type are rentals.
    pub fn is_rental(&self) -> bool {
        self.name == RENTAL_TYPE_NAME
    }
}
