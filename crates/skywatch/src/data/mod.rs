//! Data persistence
//!
//! Handles search history, the watchlist, and settings.

pub mod history;
pub mod normalize;
pub mod settings;
pub mod storage;
pub mod watchlist;

#[cfg(test)]
mod testing;

// Re-export common types
pub use history::HistoryService;
pub use normalize::normalize_city;
pub use settings::Settings;
pub use storage::{config_dir, data_path};
pub use watchlist::WatchlistService;
