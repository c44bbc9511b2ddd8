//! Exoplanet record loading
//!
//! Records come from the first available of:
//! 1. the comprehensive catalog document (passed through unchanged)
//! 2. scraped page text, run through the keyword/pattern [`Extractor`]
//! 3. the built-in [`fallback_catalog`]
//!
//! Failures in 1 and 2 are logged and skipped; 3 always succeeds.

pub mod error;
pub mod extractor;
pub mod fallback;
pub mod loader;
pub mod source;
pub mod store;
pub mod tables;

pub use error::{SourceError, SourceErrorKind};
pub use extractor::{Extractor, UnitLabels, UnitMatch};
pub use fallback::fallback_catalog;
pub use loader::{LoadedRecords, RecordLoader};
pub use source::{CatalogSource, RecordOrigin, RecordSource, ResourceLocation, ScrapedSource};
pub use store::{DISPLAY_LIMIT, LoadState, RecordStore};
