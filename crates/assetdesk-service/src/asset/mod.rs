//! Asset and asset type services.

pub mod service;
pub mod types;

pub use service::{AssetDetail, AssetListItem, AssetService};
pub use types::AssetTypeService;
