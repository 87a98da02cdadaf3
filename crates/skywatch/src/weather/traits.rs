//! Weather provider trait

use crate::error::Result;

use super::types::{CurrentWeather, Forecast, Units};

/// A source of current conditions and forecasts
///
/// Implementations validate the city name themselves and map HTTP
/// failures onto [`AppError`](crate::error::AppError) variants.
pub trait WeatherProvider: Send + Sync {
    /// Display name for the provider (e.g., "OpenWeatherMap")
    fn name(&self) -> &'static str;

    /// Current conditions for a city
    fn current(&self, city: &str, units: Units) -> Result<CurrentWeather>;

    /// Multi-day forecast for a city
    fn forecast(&self, city: &str, units: Units) -> Result<Forecast>;
}
