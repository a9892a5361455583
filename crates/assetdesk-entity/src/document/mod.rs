//! Documents attached to assets (invoices, contracts, manuals).

pub mod model;

pub use model::Document;
