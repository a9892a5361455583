//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod notification;
pub mod rule;
pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use assetdesk_core::config::AppConfig;
use assetdesk_core::error::AppError;
use assetdesk_database::StoreProvider;

/// AssetDesk: asset lifecycle tracking and notifications
#[derive(Debug, Parser)]
#[command(name = "assetdesk", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Environment overlay to load on top of default.toml
    #[arg(short, long, env = "ASSETDESK_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the AssetDesk server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Generate and inspect notifications
    Notifications(notification::NotificationArgs),
    /// Inspect notification rules
    Rules(rule::RuleArgs),
    /// Insert demo users, assets and rules
    Seed,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Notifications(args) => {
                notification::execute(args, &config, self.format).await
            }
            Commands::Rules(args) => rule::execute(args, &config, self.format).await,
            Commands::Seed => seed::execute(&config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, self.format),
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from(&self.config, &self.env).map_err(|e| {
            AppError::configuration(format!(
                "Failed to load config from '{}' (env: {}): {}",
                self.config, self.env, e.message
            ))
        })
    }
}

/// Helper: open the record stores selected by the configuration.
pub async fn open_stores(config: &AppConfig) -> Result<StoreProvider, AppError> {
    if !config.database.is_postgres() {
        tracing::warn!("Using the in-memory record store; nothing will be persisted");
    }
    StoreProvider::new(&config.database).await
}
