//! Configuration constants for skywatch

/// Application metadata
pub mod app {
    /// Application name (used for config directory, etc.)
    pub const NAME: &str = "skywatch";
}

/// Data file names inside the config directory
pub mod files {
    /// Recently searched cities
    pub const HISTORY: &str = "search_history.json";

    /// Watched cities
    pub const WATCHLIST: &str = "watchlist.json";

    /// User preferences
    pub const SETTINGS: &str = "settings.json";
}

/// Search history configuration
pub mod history {
    /// Maximum number of cities kept, most recent first
    pub const MAX_ENTRIES: usize = 10;
}

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("Skywatch/", env!("CARGO_PKG_VERSION"));

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Overall request timeout in seconds
    pub const READ_TIMEOUT_SECS: u64 = 10;
}

/// Weather API configuration
pub mod weather {
    /// Current conditions endpoint
    pub const CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

    /// 5 day / 3 hour forecast endpoint
    pub const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

    /// Condition icon URL, `{icon}` is replaced by the icon code
    pub const ICON_URL_TEMPLATE: &str = "https://openweathermap.org/img/wn/{icon}@2x.png";

    /// Environment variable holding the API key
    pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
}

/// Weather alert thresholds, compared against the temperature in the
/// requested unit system
pub mod alerts {
    /// Above this temperature a heat alert is raised
    pub const HOT_THRESHOLD: f64 = 35.0;

    /// Below this temperature a cold alert is raised
    pub const COLD_THRESHOLD: f64 = 5.0;
}
