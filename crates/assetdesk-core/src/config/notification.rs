//! Notification generation settings.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Largest accepted window, in hours (ten years).
const MAX_WINDOW_HOURS: i64 = 24 * 3_660;

/// Tunables for the notification generation pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Half-width of the match window around the target date, in hours.
    #[serde(default = "default_match_window")]
    pub match_window_hours: i64,
    /// How far back an existing notification suppresses a new one, in hours.
    #[serde(default = "default_dedup_window")]
    pub dedup_window_hours: i64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            match_window_hours: default_match_window(),
            dedup_window_hours: default_dedup_window(),
        }
    }
}

impl NotificationConfig {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        for (key, hours) in [
            ("match_window_hours", self.match_window_hours),
            ("dedup_window_hours", self.dedup_window_hours),
        ] {
            if !(0..=MAX_WINDOW_HOURS).contains(&hours) {
                return Err(AppError::configuration(format!(
                    "notifications.{key} must be between 0 and {MAX_WINDOW_HOURS}, got {hours}"
                )));
            }
        }
        Ok(())
    }
}

fn default_match_window() -> i64 {
    12
}

fn default_dedup_window() -> i64 {
    24
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_hours_are_bounded() {
        assert!(NotificationConfig::default().validate().is_ok());

        let negative = NotificationConfig {
            match_window_hours: -1,
            ..NotificationConfig::default()
        };
        assert!(negative.validate().is_err());

        let huge = NotificationConfig {
            dedup_window_hours: i64::MAX,
            ..NotificationConfig::default()
        };
        assert!(huge.validate().is_err());
    }
}
