//! Weather lookups
//!
//! Provider trait, the OpenWeatherMap implementation, and
//! presentation-free helpers over the results.

pub mod conditions;
pub mod openweather;
pub mod traits;
pub mod types;

// Re-exports
pub use conditions::{alerts, condition_emoji, WeatherAlert};
pub use openweather::{status_error, validate_city, OpenWeatherProvider};
pub use traits::WeatherProvider;
pub use types::{icon_url, CurrentWeather, Forecast, ForecastEntry, Units};
