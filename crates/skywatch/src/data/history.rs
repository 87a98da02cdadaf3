//! Search history
//!
//! Recently searched cities, most recent first, capped at
//! [`MAX_ENTRIES`](crate::config::history::MAX_ENTRIES). The list is
//! written back to disk after every change.

use crate::config::history::MAX_ENTRIES;
use crate::data::normalize::{dedupe_normalized, normalize_city};
use crate::data::storage;
use std::path::{Path, PathBuf};

/// Bounded, deduplicated list of searched cities backed by a JSON file
///
/// None of the public methods fail. A missing or corrupt file loads as an
/// empty history and is overwritten on the next change; a failed write is
/// logged and the in-memory list stays authoritative.
#[derive(Debug)]
pub struct HistoryService {
    path: PathBuf,
    entries: Vec<String>,
}

impl HistoryService {
    /// Open the history file at a specific path
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match storage::load_from::<Vec<String>>(&path) {
            Ok(Some(raw)) => {
                let mut entries = dedupe_normalized(raw);
                entries.truncate(MAX_ENTRIES);
                entries
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "resetting unreadable search history");
                Vec::new()
            }
        };

        tracing::debug!(path = %path.display(), count = entries.len(), "loaded search history");
        Self { path, entries }
    }

    /// Record a search, moving the city to the front
    ///
    /// Blank input is ignored. A city already in the list is moved rather
    /// than duplicated, and the oldest entry is dropped past the cap.
    pub fn add_city(&mut self, city: &str) {
        let Some(city) = normalize_city(city) else {
            return;
        };

        self.entries.retain(|c| *c != city);
        self.entries.insert(0, city);
        self.entries.truncate(MAX_ENTRIES);
        self.persist();
    }

    /// Cities in most-recent-first order
    pub fn history(&self) -> &[String] {
        &self.entries
    }

    /// Forget every search
    pub fn clear_history(&mut self) {
        self.entries.clear();
        self.persist();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Backing file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        if let Err(e) = storage::save_to(&self.path, &self.entries) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to save search history");
        }
    }
}
