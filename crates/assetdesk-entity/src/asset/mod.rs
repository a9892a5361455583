//! Asset domain entities.

pub mod filter;
pub mod lifecycle;
pub mod model;
pub mod status;

pub use filter::{AssetDateField, AssetEventFilter, AssetListFilter, DateWindow};
pub use model::{Asset, AssetInput, AssetSummary};
pub use status::AssetStatus;
