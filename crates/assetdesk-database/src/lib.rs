//! # assetdesk-database
//!
//! Record store traits for every AssetDesk entity, their PostgreSQL
//! implementations, an in-memory backend, and the provider that picks
//! one of them from configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use provider::StoreProvider;
pub use store::{AssetStore, AssetTypeStore, NotificationRuleStore, NotificationStore, UserStore};
