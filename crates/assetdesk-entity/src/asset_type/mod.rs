//! Asset type (category) entities.

pub mod model;

pub use model::{AssetType, DEFAULT_ASSET_TYPES, RENTAL_TYPE_NAME};
