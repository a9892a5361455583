//! Route handlers organized by domain.

pub mod asset;
pub mod health;
pub mod notification;
pub mod rule;
pub mod user;
