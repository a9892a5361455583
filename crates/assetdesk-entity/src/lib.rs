//! # assetdesk-entity
//!
//! Domain entity models for AssetDesk. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! Wire names are camelCase to match the JSON API.

pub mod asset;
pub mod asset_type;
pub mod document;
pub mod notification;
pub mod user;
