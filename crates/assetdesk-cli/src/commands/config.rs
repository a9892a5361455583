//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use assetdesk_core::config::AppConfig;
use assetdesk_core::error::AppError;
use assetdesk_database::connection::redact_url;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration and print a summary
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.database.url = redact_url(&shown.database.url);
            output::print_item(&shown, format);
        }
        ConfigCommand::Validate => {
            config.validate()?;
            output::print_success("Configuration is valid");
            output::print_kv("Server", &config.server.bind_address());
            output::print_kv("Database", &config.database.provider);
            if config.database.is_postgres() {
                output::print_kv("Database URL", &redact_url(&config.database.url));
            }
            output::print_kv("Log level", &config.logging.level);
            output::print_kv(
                "Match window",
                &format!("±{}h", config.notifications.match_window_hours),
            );
            output::print_kv(
                "Dedup window",
                &format!("{}h", config.notifications.dedup_window_hours),
            );
        }
    }
    Ok(())
}
