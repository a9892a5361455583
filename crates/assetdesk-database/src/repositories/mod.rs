//! PostgreSQL implementations of the record store traits.

pub mod asset;
pub mod asset_type;
pub mod notification;
pub mod notification_rule;
pub mod user;

pub use asset::AssetRepository;
pub use asset_type::AssetTypeRepository;
pub use notification::NotificationRepository;
pub use notification_rule::NotificationRuleRepository;
pub use user::UserRepository;

use assetdesk_core::error::{AppError, ErrorKind};

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Map a sqlx error to [`AppError`], turning constraint violations into
/// conflicts so the HTTP layer can answer 409 instead of 500.
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> AppError {
    let code = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned());

    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => AppError::with_source(
            ErrorKind::Conflict,
            format!("{context}: a record with the same unique value already exists"),
            err,
        ),
        Some(FOREIGN_KEY_VIOLATION) => AppError::with_source(
            ErrorKind::Conflict,
            format!("{context}: the record is still referenced or references a missing record"),
            err,
        ),
        _ => AppError::with_source(ErrorKind::Database, context.to_string(), err),
    }
}
