//! Demo data for trying AssetDesk out: four users, five assets and two
//! notification rules. Seeding is idempotent; records that already exist
//! are left untouched.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use assetdesk_core::error::AppError;
use assetdesk_core::result::AppResult;
use assetdesk_core::types::UserId;
use assetdesk_database::store::{AssetStore, AssetTypeStore, NotificationRuleStore, UserStore};
use assetdesk_entity::asset::{AssetInput, AssetListFilter, AssetStatus};
use assetdesk_entity::notification::{NotificationEventType, NotificationRuleInput, RecipientList};
use assetdesk_entity::user::{CreateUser, User, UserRole};

type Ymd = (i32, u32, u32);

struct DemoUser {
    name: &'static str,
    email: &'static str,
    role: UserRole,
}

struct DemoAsset {
    name: &'static str,
    description: &'static str,
    serial_number: Option<&'static str>,
    asset_type: &'static str,
    purchase_date: Ymd,
    warranty_expiry_date: Option<Ymd>,
    renewal_date: Option<Ymd>,
    purchase_price: f64,
    purchased_by: usize,
    current_user: usize,
    location: Option<&'static str>,
    license_key: Option<&'static str>,
    tags: &'static str,
}

struct DemoRule {
    asset_type: &'static str,
    event_type: NotificationEventType,
    days_in_advance: i32,
    recipients: &'static [usize],
}

const USERS: [DemoUser; 4] = [
    DemoUser {
        name: "Taro Yamada",
        email: "yamada@example.com",
        role: UserRole::Buyer,
    },
    DemoUser {
        name: "Hanako Sato",
        email: "sato@example.com",
        role: UserRole::User,
    },
    DemoUser {
        name: "Ichiro Suzuki",
        email: "suzuki@example.com",
        role: UserRole::User,
    },
    DemoUser {
        name: "IT Department",
        email: "it@example.com",
        role: UserRole::Admin,
    },
];

const ASSETS: [DemoAsset; 5] = [
    DemoAsset {
        name: "Development MacBook Pro",
        description: "MacBook Pro for the development team",
        serial_number: Some("FVFXC2JQXXXXXX"),
        asset_type: "hardware",
        purchase_date: (2023, 1, 15),
        warranty_expiry_date: Some((2025, 1, 15)),
        renewal_date: None,
        purchase_price: 240_000.0,
        purchased_by: 0,
        current_user: 1,
        location: Some("Tokyo office"),
        license_key: None,
        tags: "PC,development,Apple",
    },
    DemoAsset {
        name: "Adobe Creative Cloud",
        description: "Adobe CC for the design team",
        serial_number: Some("ADBE-1234-5678"),
        asset_type: "subscription",
        purchase_date: (2023, 5, 10),
        warranty_expiry_date: None,
        renewal_date: Some((2024, 5, 10)),
        purchase_price: 69_800.0,
        purchased_by: 3,
        current_user: 2,
        location: None,
        license_key: Some("XXXX-YYYY-ZZZZ"),
        tags: "design,software,Adobe",
    },
    DemoAsset {
        name: "example.com",
        description: "Domain for the company website",
        serial_number: None,
        asset_type: "domain",
        purchase_date: (2022, 3, 20),
        warranty_expiry_date: None,
        renewal_date: Some((2025, 3, 20)),
        purchase_price: 2_000.0,
        purchased_by: 3,
        current_user: 3,
        location: None,
        license_key: None,
        tags: "domain,web",
    },
    DemoAsset {
        name: "SSL certificate (example.com)",
        description: "SSL certificate for the company website",
        serial_number: Some("SSL-9876-5432"),
        asset_type: "ssl_certificate",
        purchase_date: (2023, 9, 5),
        warranty_expiry_date: None,
        renewal_date: Some((2024, 9, 5)),
        purchase_price: 15_000.0,
        purchased_by: 3,
        current_user: 3,
        location: None,
        license_key: None,
        tags: "SSL,web,security",
    },
    DemoAsset {
        name: "Rental PC (sales)",
        description: "Rental notebook for the sales team",
        serial_number: Some("LN-5678"),
        asset_type: "rental",
        purchase_date: (2023, 6, 1),
        warranty_expiry_date: None,
        renewal_date: Some((2024, 6, 1)),
        purchase_price: 8_000.0,
        purchased_by: 0,
        current_user: 2,
        location: Some("Osaka office"),
        license_key: None,
        tags: "PC,rental,sales",
    },
];

const RULES: [DemoRule; 2] = [
    DemoRule {
        asset_type: "hardware",
        event_type: NotificationEventType::WarrantyExpiry,
        days_in_advance: 30,
        recipients: &[3],
    },
    DemoRule {
        asset_type: "subscription",
        event_type: NotificationEventType::RenewalDue,
        days_in_advance: 14,
        recipients: &[0, 3],
    },
];

/// Number of records each seeding run created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    pub users: usize,
    pub assets: usize,
    pub rules: usize,
}

/// Inserts the demo data set through the record stores.
#[derive(Debug, Clone)]
pub struct DemoSeeder {
    users: Arc<dyn UserStore>,
    asset_types: Arc<dyn AssetTypeStore>,
    assets: Arc<dyn AssetStore>,
    rules: Arc<dyn NotificationRuleStore>,
}

impl DemoSeeder {
    /// Creates a new seeder.
    pub fn new(
        users: Arc<dyn UserStore>,
        asset_types: Arc<dyn AssetTypeStore>,
        assets: Arc<dyn AssetStore>,
        rules: Arc<dyn NotificationRuleStore>,
    ) -> Self {
        Self {
            users,
            asset_types,
            assets,
            rules,
        }
    }

    /// Insert whatever part of the demo data set is missing.
    pub async fn seed(&self) -> AppResult<SeedReport> {
        let mut report = SeedReport::default();

        let mut users: Vec<User> = Vec::with_capacity(USERS.len());
        for demo in &USERS {
            let user = match self.users.find_by_email(demo.email).await? {
                Some(existing) => existing,
                None => {
                    report.users += 1;
                    self.users
                        .create(CreateUser {
                            name: demo.name.to_string(),
                            email: demo.email.to_string(),
                            role: demo.role,
                        })
                        .await?
                }
            };
            users.push(user);
        }

        for demo in &ASSETS {
            if self.asset_exists(demo.name).await? {
                continue;
            }
            let input = self.asset_input(demo, &users).await?;
            self.assets.create(input).await?;
            report.assets += 1;
        }

        let existing_rules = self.rules.list().await?;
        for demo in &RULES {
            let present = existing_rules.iter().any(|rule| {
                rule.asset_type == demo.asset_type
                    && rule.event_type == demo.event_type
                    && rule.days_in_advance == demo.days_in_advance
            });
            if present {
                continue;
            }
            let recipients: Vec<String> = demo
                .recipients
                .iter()
                .map(|&i| users[i].id.to_string())
                .collect();
            self.rules
                .create(NotificationRuleInput {
                    asset_type: demo.asset_type.to_string(),
                    event_type: demo.event_type,
                    days_in_advance: demo.days_in_advance,
                    notify_users: RecipientList::parse(&recipients.join(",")),
                    email_enabled: true,
                    app_enabled: true,
                    active: true,
                })
                .await?;
            report.rules += 1;
        }

        info!(
            users = report.users,
            assets = report.assets,
            rules = report.rules,
            "Demo data seeded"
        );
        Ok(report)
    }

    async fn asset_exists(&self, name: &str) -> AppResult<bool> {
        let filter = AssetListFilter {
            search: Some(name.to_string()),
            ..AssetListFilter::default()
        };
        let found = self.assets.list(&filter).await?;
        Ok(found.iter().any(|asset| asset.name == name))
    }

    async fn asset_input(&self, demo: &DemoAsset, users: &[User]) -> AppResult<AssetInput> {
        let asset_type = self
            .asset_types
            .find_by_name(demo.asset_type)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Asset type '{}' is missing; run migrations first",
                    demo.asset_type
                ))
            })?;
        let user_id = |i: usize| -> UserId { users[i].id.clone() };

        Ok(AssetInput {
            name: demo.name.to_string(),
            description: Some(demo.description.to_string()),
            serial_number: demo.serial_number.map(str::to_string),
            asset_type_id: asset_type.id,
            purchase_date: midnight(demo.purchase_date)?,
            purchase_price: Some(demo.purchase_price),
            currency: "JPY".to_string(),
            purchased_by_id: user_id(demo.purchased_by),
            current_user_id: user_id(demo.current_user),
            status: AssetStatus::Active,
            location: demo.location.map(str::to_string),
            notes: None,
            warranty_expiry_date: demo.warranty_expiry_date.map(midnight).transpose()?,
            depreciation_period: None,
            renewal_date: demo.renewal_date.map(midnight).transpose()?,
            license_key: demo.license_key.map(str::to_string),
            tags: Some(demo.tags.to_string()),
        })
    }
}

fn midnight((year, month, day): Ymd) -> AppResult<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::internal(format!("Invalid demo date {year}-{month}-{day}")))
}
