//! Notification rule inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use assetdesk_core::config::AppConfig;
use assetdesk_core::error::AppError;
use assetdesk_database::NotificationRuleStore;
use assetdesk_entity::notification::NotificationRule;

/// Arguments for rule commands
#[derive(Debug, Args)]
pub struct RuleArgs {
    /// Rule subcommand
    #[command(subcommand)]
    pub command: RuleCommand,
}

/// Rule subcommands
#[derive(Debug, Subcommand)]
pub enum RuleCommand {
    /// List rules, newest first
    List {
        /// Only rules the generator will evaluate
        #[arg(long)]
        active: bool,
    },
}

/// Rule display row
#[derive(Debug, Serialize, Tabled)]
struct RuleRow {
    id: String,
    asset_type: String,
    #[tabled(rename = "event")]
    event_type: String,
    days: i32,
    recipients: String,
    active: String,
}

impl From<&NotificationRule> for RuleRow {
    fn from(rule: &NotificationRule) -> Self {
        Self {
            id: output::short_id(rule.id.as_str()),
            asset_type: rule.asset_type.clone(),
            event_type: rule.event_type.to_string(),
            days: rule.days_in_advance,
            recipients: rule.notify_users.to_joined(),
            active: if rule.active { "✓" } else { "✗" }.to_string(),
        }
    }
}

/// Execute rule commands
pub async fn execute(
    args: &RuleArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;

    let result = match &args.command {
        RuleCommand::List { active } => {
            let rules = if *active {
                stores.rules.find_active().await
            } else {
                stores.rules.list().await
            };
            rules.map(|rules| {
                let rows: Vec<RuleRow> = rules.iter().map(RuleRow::from).collect();
                output::print_list(&rows, format);
            })
        }
    };

    stores.close().await;
    result
}
