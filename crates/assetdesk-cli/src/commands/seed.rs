//! Demo data seeding command.

use crate::output::{self, OutputFormat};
use assetdesk_core::config::AppConfig;
use assetdesk_core::error::AppError;
use assetdesk_service::DemoSeeder;

/// Execute the seed command
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;
    let seeder = DemoSeeder::new(
        stores.users.clone(),
        stores.asset_types.clone(),
        stores.assets.clone(),
        stores.rules.clone(),
    );

    let result = seeder.seed().await.map(|report| match format {
        OutputFormat::Json => output::print_item(&report, format),
        OutputFormat::Table => {
            output::print_success("Demo data seeded.");
            output::print_kv("Users created", &report.users.to_string());
            output::print_kv("Assets created", &report.assets.to_string());
            output::print_kv("Rules created", &report.rules.to_string());
        }
    });

    stores.close().await;
    result
}
