//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use assetdesk_core::config::AppConfig;
use assetdesk_core::error::AppError;
use assetdesk_database::{connection, migration};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Show migrations that have not been applied yet
    Status,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    if !config.database.is_postgres() {
        return Err(AppError::configuration(
            "Migrations require database.provider = \"postgres\"",
        ));
    }

    let pool = connection::open_pool(&config.database).await?;

    let result = match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            migration::run_migrations(&pool).await.map(|applied| {
                output::print_success(&format!("{applied} migration(s) applied."));
            })
        }
        MigrateCommand::Status => migration::pending_migrations(&pool)
            .await
            .map(|pending| {
                if pending.is_empty() {
                    output::print_success("Database schema is up to date.");
                } else {
                    println!("Pending migrations:");
                    for (version, description) in &pending {
                        output::print_kv(&version.to_string(), description);
                    }
                }
            }),
    };

    pool.close().await;
    result
}
