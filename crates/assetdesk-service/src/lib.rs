//! # assetdesk-service
//!
//! Business logic service layer for AssetDesk. Each service orchestrates
//! record stores to implement application-level use cases; the
//! notification engine turns rules and asset dates into notifications.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod asset;
pub mod notification;
pub mod seed;
pub mod user;

pub use asset::{AssetService, AssetTypeService};
pub use notification::{
    GenerationReport, NotificationEngine, NotificationRuleService, NotificationService,
};
pub use seed::{DemoSeeder, SeedReport};
pub use user::UserService;
