//! Skywatch services
//!
//! Search history and watchlist persistence, user settings, and weather
//! lookups for the skywatch front ends.
//!
//! ## Quick start
//!
//! ```no_run
//! use skywatch::data::{HistoryService, WatchlistService};
//!
//! let mut history = HistoryService::load_from("search_history.json");
//! history.add_city("  new york ");
//! assert_eq!(history.history()[0], "New York");
//!
//! let mut watchlist = WatchlistService::load_from("watchlist.json");
//! watchlist.add_city("Paris");
//! assert!(watchlist.city_exists("paris"));
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod network;
pub mod weather;

pub use error::{AppError, Result};
