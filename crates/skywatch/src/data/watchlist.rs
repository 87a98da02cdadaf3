//! City watchlist
//!
//! Unbounded set of cities the user follows. Insertion order is kept for
//! display only.

use crate::data::normalize::{dedupe_normalized, normalize_city};
use crate::data::storage;
use std::path::{Path, PathBuf};

/// Duplicate-free list of watched cities backed by a JSON file
///
/// Same failure policy as [`HistoryService`](crate::data::HistoryService):
/// corrupt files load empty, write failures are logged and swallowed.
#[derive(Debug)]
pub struct WatchlistService {
    path: PathBuf,
    cities: Vec<String>,
}

impl WatchlistService {
    /// Open the watchlist file at a specific path
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cities = match storage::load_from::<Vec<String>>(&path) {
            Ok(Some(raw)) => dedupe_normalized(raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "resetting unreadable watchlist");
                Vec::new()
            }
        };

        tracing::debug!(path = %path.display(), count = cities.len(), "loaded watchlist");
        Self { path, cities }
    }

    /// Check membership using the normalized name
    pub fn city_exists(&self, city: &str) -> bool {
        normalize_city(city).is_some_and(|c| self.cities.contains(&c))
    }

    /// Add a city; returns `false` if it was blank or already watched
    pub fn add_city(&mut self, city: &str) -> bool {
        let Some(city) = normalize_city(city) else {
            return false;
        };
        if self.cities.contains(&city) {
            return false;
        }

        self.cities.push(city);
        self.persist();
        true
    }

    /// Remove a city; returns `false` if it was not watched
    pub fn remove_city(&mut self, city: &str) -> bool {
        let Some(city) = normalize_city(city) else {
            return false;
        };
        let Some(pos) = self.cities.iter().position(|c| *c == city) else {
            return false;
        };

        self.cities.remove(pos);
        self.persist();
        true
    }

    /// Watched cities in the order they were added
    pub fn watchlist(&self) -> &[String] {
        &self.cities
    }

    /// Stop watching every city
    pub fn clear_watchlist(&mut self) {
        self.cities.clear();
        self.persist();
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Backing file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        if let Err(e) = storage::save_to(&self.path, &self.cities) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to save watchlist");
        }
    }
}
