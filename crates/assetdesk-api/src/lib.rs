//! # assetdesk-api
//!
//! HTTP API layer for AssetDesk built on Axum.
//!
//! Provides the REST endpoints for users, assets, notification rules and
//! notifications, the generation trigger, middleware (CORS, compression,
//! request logging), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
