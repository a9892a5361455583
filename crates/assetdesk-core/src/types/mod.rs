//! Core type definitions used across the AssetDesk workspace.

pub mod id;

pub use id::*;
