//! Notification domain entities.

pub mod event_type;
pub mod model;
pub mod recipients;
pub mod rule;

pub use event_type::NotificationEventType;
pub use model::{CreateNotification, Notification, NotificationFilter};
pub use recipients::RecipientList;
pub use rule::{ALL_ASSET_TYPES, MAX_DAYS_IN_ADVANCE, NotificationRule, NotificationRuleInput};
