//! Comprehensive catalog builder
//!
//! Queries the NASA Exoplanet Archive, derives type, habitability and a
//! short description for every planet, and writes the catalog resource
//! read by the record loader.

pub mod builder;
pub mod classify;
pub mod client;
pub mod types;

pub use builder::{CatalogBuilder, record_from_row, save_document, seed_catalog};
pub use client::ArchiveClient;
pub use types::ArchiveRow;
