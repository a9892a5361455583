//! Notification generation, notification records, and the rules that
//! drive generation.

pub mod engine;
pub mod rule_service;
pub mod service;

pub use engine::{GenerationReport, NotificationEngine};
pub use rule_service::NotificationRuleService;
pub use service::{NotificationService, NotificationView};
