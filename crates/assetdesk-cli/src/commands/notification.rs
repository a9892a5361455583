//! Notification generation and listing commands.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use assetdesk_core::config::AppConfig;
use assetdesk_core::error::AppError;
use assetdesk_core::types::UserId;
use assetdesk_database::NotificationStore;
use assetdesk_entity::notification::{Notification, NotificationFilter};
use assetdesk_service::NotificationEngine;

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationArgs {
    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// Run one generation pass over all active rules
    Generate {
        /// Evaluate as of this instant (RFC 3339) or day (YYYY-MM-DD, midnight UTC)
        #[arg(long, value_parser = parse_instant)]
        date: Option<DateTime<Utc>>,
    },
    /// List notifications, newest first
    List {
        /// Only notifications for this user id
        #[arg(long)]
        user: Option<String>,
        /// Only unread notifications
        #[arg(long)]
        unread: bool,
    },
}

/// Notification display row
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    /// Notification ID
    id: String,
    /// Event type
    #[tabled(rename = "type")]
    event_type: String,
    /// Title
    title: String,
    /// Recipient
    user: String,
    /// Read flag
    read: String,
    /// Target date
    scheduled: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: output::short_id(n.id.as_str()),
            event_type: n.event_type.to_string(),
            title: n.title.clone(),
            user: n.user_id.to_string(),
            read: if n.is_read { "✓" } else { "✗" }.to_string(),
            scheduled: n.scheduled_date.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute notification commands
pub async fn execute(
    args: &NotificationArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;

    let result = match &args.command {
        NotificationCommand::Generate { date } => {
            let engine = NotificationEngine::new(
                Arc::clone(&stores.rules),
                Arc::clone(&stores.assets),
                Arc::clone(&stores.notifications),
                config.notifications,
            );
            let today = date.unwrap_or_else(Utc::now);
            engine.generate_at(today).await.map(|report| match format {
                OutputFormat::Table => {
                    let rows: Vec<NotificationRow> =
                        report.notifications.iter().map(NotificationRow::from).collect();
                    output::print_list(&rows, format);
                    output::print_success(&format!("{} notification(s) created", report.count));
                }
                OutputFormat::Json => output::print_item(&report, format),
            })
        }
        NotificationCommand::List { user, unread } => {
            let filter = NotificationFilter {
                user_id: user.as_deref().map(UserId::from),
                is_read: unread.then_some(false),
            };
            stores.notifications.list(&filter).await.map(|notifications| {
                let rows: Vec<NotificationRow> =
                    notifications.iter().map(NotificationRow::from).collect();
                output::print_list(&rows, format);
            })
        }
    };

    stores.close().await;
    result
}

/// Accept either a full RFC 3339 timestamp or a bare date.
fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|day| day.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|_| format!("'{raw}' is neither RFC 3339 nor YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_instant_accepts_date_and_timestamp() {
        assert_eq!(
            parse_instant("2025-06-01").unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_instant("2025-06-01T09:00:00+09:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
        );
        assert!(parse_instant("June 1st").is_err());
    }
}
