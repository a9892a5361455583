//! Asset lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where an asset is in its lifecycle. Only `Active` assets take part in
/// notification generation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "asset_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// In use.
    #[default]
    Active,
    /// Owned but not in use.
    Inactive,
    /// Past its warranty or subscription term.
    Expired,
    /// Sold, scrapped, or written off.
    Disposed,
    /// Rental handed back to the lessor.
    Returned,
}

impl AssetStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Expired => "expired",
            Self::Disposed => "disposed",
            Self::Returned => "returned",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = assetdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "expired" => Ok(Self::Expired),
            "disposed" => Ok(Self::Disposed),
            "returned" => Ok(Self::Returned),
            _ => Err(assetdesk_core::AppError::validation(format!(
                "Invalid asset status: '{s}'. Expected one of: active, inactive, expired, disposed, returned"
            ))),
        }
    }
}
