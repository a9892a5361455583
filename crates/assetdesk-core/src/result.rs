//! Convenience result type alias for AssetDesk.

use crate::error::AppError;

/// Result of any fallible AssetDesk operation.
pub type AppResult<T> = Result<T, AppError>;
