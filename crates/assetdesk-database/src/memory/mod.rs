//! In-process record store used for development and tests.

pub mod store;

pub use store::MemoryStore;
