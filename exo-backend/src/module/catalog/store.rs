//! Read-only record list held for the whole session

use exo_common::ExoplanetRecord;
use std::sync::Arc;

use super::loader::{LoadedRecords, RecordLoader};
use super::source::RecordOrigin;

/// At most this many records are listed at once
pub const DISPLAY_LIMIT: usize = 50;

/// Immutable after construction; clones share the same list.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[ExoplanetRecord]>,
    origin: RecordOrigin,
}

impl RecordStore {
    pub fn new(loaded: LoadedRecords) -> Self {
        Self {
            records: loaded.records.into(),
            origin: loaded.origin,
        }
    }

    /// Run the loader once and freeze the result
    pub async fn load(loader: &RecordLoader) -> Self {
        Self::new(loader.load().await)
    }

    pub fn records(&self) -> &[ExoplanetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn origin(&self) -> RecordOrigin {
        self.origin
    }

    /// Case-insensitive substring match on `name`, in load order.
    /// A blank term matches everything.
    pub fn search<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a ExoplanetRecord> + use<'a> {
        let needle = term.trim().to_lowercase();
        self.records
            .iter()
            .filter(move |r| needle.is_empty() || r.name.to_lowercase().contains(&needle))
    }

    /// Search results capped at [`DISPLAY_LIMIT`]
    pub fn display_page(&self, term: &str) -> Vec<&ExoplanetRecord> {
        self.search(term).take(DISPLAY_LIMIT).collect()
    }
}

/// Startup state seen by a presentation layer
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(RecordStore),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn store(&self) -> Option<&RecordStore> {
        match self {
            LoadState::Loading => None,
            LoadState::Ready(store) => Some(store),
        }
    }
}
