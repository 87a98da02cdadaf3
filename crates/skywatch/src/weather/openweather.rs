//! OpenWeatherMap provider
//!
//! Implementation of `WeatherProvider` for the OpenWeatherMap 2.5 API
//! (<https://openweathermap.org/current>).

use crate::config::weather::{API_KEY_ENV, CURRENT_URL, FORECAST_URL};
use crate::error::{AppError, Result};
use crate::network::HttpClient;

use super::traits::WeatherProvider;
use super::types::{capitalize, CurrentWeather, Forecast, ForecastEntry, Units};

use chrono::{DateTime, Utc};
use reqwest::blocking::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;

// =============================================================================
// Internal API response types (serde)
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct OwCoord {
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    temp_min: Option<f64>,
    temp_max: Option<f64>,
    humidity: Option<u8>,
    pressure: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct OwCondition {
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: Option<f64>,
    deg: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct OwClouds {
    all: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrent {
    #[serde(default)]
    name: String,
    #[serde(default)]
    coord: OwCoord,
    #[serde(default)]
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwCondition>,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    clouds: OwClouds,
    visibility: Option<u32>,
    #[serde(default)]
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastItem {
    dt: i64,
    #[serde(default)]
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwCondition>,
}

#[derive(Debug, Default, Deserialize)]
struct OwCity {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecast {
    #[serde(default)]
    list: Vec<OwForecastItem>,
    #[serde(default)]
    city: OwCity,
}

fn timestamp(secs: Option<i64>) -> Option<DateTime<Utc>> {
    secs.and_then(|s| DateTime::from_timestamp(s, 0))
}

impl OwCurrent {
    fn into_weather(self, requested: &str, units: Units) -> CurrentWeather {
        let condition = self.weather.into_iter().next().unwrap_or_default();
        let city = if self.name.is_empty() {
            requested.to_string()
        } else {
            self.name
        };

        CurrentWeather {
            city,
            country: self.sys.country,
            latitude: self.coord.lat,
            longitude: self.coord.lon,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            description: capitalize(&condition.description),
            icon: condition.icon,
            wind_speed: self.wind.speed,
            wind_deg: self.wind.deg,
            clouds: self.clouds.all,
            visibility: self.visibility,
            sunrise: timestamp(self.sys.sunrise),
            sunset: timestamp(self.sys.sunset),
            units,
        }
    }
}

impl OwForecast {
    fn into_forecast(self, requested: &str, units: Units) -> Forecast {
        let entries = self
            .list
            .into_iter()
            .filter_map(|item| {
                let time = DateTime::from_timestamp(item.dt, 0)?;
                let condition = item.weather.into_iter().next().unwrap_or_default();
                Some(ForecastEntry {
                    time,
                    temperature: item.main.temp,
                    temp_min: item.main.temp_min,
                    temp_max: item.main.temp_max,
                    description: capitalize(&condition.description),
                    icon: condition.icon,
                })
            })
            .collect();

        let city = if self.city.name.is_empty() {
            requested.to_string()
        } else {
            self.city.name
        };

        Forecast {
            city,
            entries,
            units,
        }
    }
}

// =============================================================================
// Validation and status mapping
// =============================================================================

/// Check a city name before sending it to the API
///
/// Accepts letters, whitespace, hyphens and apostrophes. Returns the
/// trimmed name.
pub fn validate_city(city: &str) -> Result<String> {
    let city = city.trim();
    if city.is_empty() {
        return Err(AppError::InvalidCity("City name cannot be empty".to_string()));
    }
    if !city
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '-' || c == '\'')
    {
        return Err(AppError::InvalidCity(format!(
            "'{city}' contains invalid characters"
        )));
    }
    Ok(city.to_string())
}

/// Map an HTTP status to an error, `None` for success
pub fn status_error(status: u16, city: &str) -> Option<AppError> {
    match status {
        200..=299 => None,
        401 => Some(AppError::Unauthorized),
        404 => Some(AppError::CityNotFound(city.to_string())),
        500..=u16::MAX => Some(AppError::Server(status)),
        _ => Some(AppError::Http(status)),
    }
}

// =============================================================================
// OpenWeatherProvider
// =============================================================================

/// OpenWeatherMap API provider
pub struct OpenWeatherProvider {
    client: HttpClient,
    api_key: String,
    current_url: String,
    forecast_url: String,
}

impl OpenWeatherProvider {
    /// Create a provider using the public endpoints
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_urls(api_key, CURRENT_URL, FORECAST_URL)
    }

    /// Create a provider with the API key from `OPENWEATHER_API_KEY`
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Self::new(key.trim()),
            _ => Err(AppError::Config(format!(
                "{API_KEY_ENV} is not set. Get a key at https://openweathermap.org/api"
            ))),
        }
    }

    /// Create a provider with custom endpoints (for testing or proxies)
    pub fn with_base_urls(
        api_key: impl Into<String>,
        current_url: impl Into<String>,
        forecast_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
            api_key: api_key.into(),
            current_url: current_url.into(),
            forecast_url: forecast_url.into(),
        })
    }

    fn fetch<T: DeserializeOwned>(&self, url: &str, city: &str, units: Units) -> Result<T> {
        let city = validate_city(city)?;
        tracing::debug!(%url, %city, %units, "requesting weather data");

        let resp: Response = self.client.get(
            url,
            &[
                ("q", city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", units.as_query()),
            ],
        )?;

        if let Some(err) = status_error(resp.status().as_u16(), &city) {
            return Err(err);
        }
        Ok(resp.json::<T>()?)
    }
}

impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &'static str {
        "OpenWeatherMap"
    }

    fn current(&self, city: &str, units: Units) -> Result<CurrentWeather> {
        let raw: OwCurrent = self.fetch(&self.current_url, city, units)?;
        Ok(raw.into_weather(city.trim(), units))
    }

    fn forecast(&self, city: &str, units: Units) -> Result<Forecast> {
        let raw: OwForecast = self.fetch(&self.forecast_url, city, units)?;
        Ok(raw.into_forecast(city.trim(), units))
    }
}
