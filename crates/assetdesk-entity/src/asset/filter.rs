//! Query shapes for looking up assets.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::model::Asset;
use super::status::AssetStatus;

/// Inclusive time range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// Earliest matching instant.
    pub start: DateTime<Utc>,
    /// Latest matching instant.
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// Window of `half_width` on either side of `center`, or `None` when
    /// an end falls outside the representable date range.
    pub fn around(center: DateTime<Utc>, half_width: TimeDelta) -> Option<Self> {
        Some(Self {
            start: center.checked_sub_signed(half_width)?,
            end: center.checked_add_signed(half_width)?,
        })
    }

    /// Whether `instant` falls inside the window, both ends included.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Which asset date a lifecycle rule compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetDateField {
    /// `warranty_expiry_date`.
    WarrantyExpiry,
    /// `renewal_date`.
    Renewal,
}

impl AssetDateField {
    /// Column name in the `assets` table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::WarrantyExpiry => "warranty_expiry_date",
            Self::Renewal => "renewal_date",
        }
    }

    /// Read this field from an asset.
    pub fn value_of(&self, asset: &Asset) -> Option<DateTime<Utc>> {
        match self {
            Self::WarrantyExpiry => asset.warranty_expiry_date,
            Self::Renewal => asset.renewal_date,
        }
    }
}

/// Candidate selection for one notification rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEventFilter {
    /// Restrict to assets whose type has this name; `None` means any type.
    pub asset_type_name: Option<String>,
    /// Required status.
    pub status: AssetStatus,
    /// Date field that must fall inside `window`, if any.
    pub date_field: Option<(AssetDateField, DateWindow)>,
    /// Require `depreciation_period` to be set.
    pub require_depreciation: bool,
}

impl AssetEventFilter {
    /// Evaluate the filter against an asset and the name of its type.
    ///
    /// Store backends that cannot push the predicate down use this directly.
    pub fn matches(&self, asset: &Asset, type_name: &str) -> bool {
        if asset.status != self.status {
            return false;
        }
        if let Some(wanted) = &self.asset_type_name {
            if wanted != type_name {
                return false;
            }
        }
        if let Some((field, window)) = &self.date_field {
            match field.value_of(asset) {
                Some(date) if window.contains(date) => {}
                _ => return false,
            }
        }
        if self.require_depreciation && asset.depreciation_period.is_none() {
            return false;
        }
        true
    }
}

/// Filters for the asset listing endpoint. All present filters must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetListFilter {
    /// Case-insensitive substring of name, serial number or description.
    pub search: Option<String>,
    /// Asset type name; `"all"` is ignored.
    pub asset_type: Option<String>,
    /// Purchaser or current user; `"all"` is ignored.
    pub user_id: Option<String>,
}

impl AssetListFilter {
    /// The search term, if non-empty.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// The asset type name, unless empty or `"all"`.
    pub fn asset_type_name(&self) -> Option<&str> {
        self.asset_type
            .as_deref()
            .filter(|s| !s.is_empty() && *s != "all")
    }

    /// The user id, unless empty or `"all"`.
    pub fn user(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .filter(|s| !s.is_empty() && *s != "all")
    }

    /// Evaluate the filter against an asset and the name of its type.
    pub fn matches(&self, asset: &Asset, type_name: &str) -> bool {
        if let Some(term) = self.search_term() {
            let term = term.to_lowercase();
            let hit = |value: Option<&str>| {
                value.is_some_and(|v| v.to_lowercase().contains(&term))
            };
            if !(hit(Some(&asset.name))
                || hit(asset.serial_number.as_deref())
                || hit(asset.description.as_deref()))
            {
                return false;
            }
        }
        if let Some(name) = self.asset_type_name() {
            if name != type_name {
                return false;
            }
        }
        if let Some(user) = self.user() {
            if asset.purchased_by_id.as_str() != user && asset.current_user_id.as_str() != user {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_is_inclusive() {
        let center = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let window = DateWindow::around(center, TimeDelta::hours(12)).unwrap();
        assert!(window.contains(center - TimeDelta::hours(12)));
        assert!(window.contains(center + TimeDelta::hours(12)));
        assert!(!window.contains(center + TimeDelta::hours(13)));
    }

    #[test]
    fn test_window_past_date_range_is_none() {
        assert!(DateWindow::around(DateTime::<Utc>::MAX_UTC, TimeDelta::hours(12)).is_none());
        assert!(DateWindow::around(DateTime::<Utc>::MIN_UTC, TimeDelta::hours(12)).is_none());
    }

    #[test]
    fn test_list_filter_ignores_all() {
        let filter = AssetListFilter {
            search: Some("  ".to_string()),
            asset_type: Some("all".to_string()),
            user_id: Some("all".to_string()),
        };
        assert_eq!(filter.search_term(), None);
        assert_eq!(filter.asset_type_name(), None);
        assert_eq!(filter.user(), None);
    }
}
