//! Shared weather types
//!
//! Provider-independent representations of current conditions and
//! forecasts.

use crate::config::weather::ICON_URL_TEMPLATE;
use crate::error::{AppError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit system for requests and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Celsius, meters per second
    #[default]
    Metric,
    /// Fahrenheit, miles per hour
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter
    pub fn as_query(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_symbol(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_unit(self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }

    /// The other unit system
    pub fn toggled(self) -> Self {
        match self {
            Units::Metric => Units::Imperial,
            Units::Imperial => Units::Metric,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

impl FromStr for Units {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(Units::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(Units::Imperial),
            other => Err(AppError::Config(format!(
                "Unknown unit system '{other}' (expected metric or imperial)"
            ))),
        }
    }
}

/// Current conditions for one city
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    /// City name as reported by the provider
    pub city: String,
    /// ISO country code, empty if unknown
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    /// Relative humidity in percent
    pub humidity: Option<u8>,
    /// Pressure in hPa
    pub pressure: Option<u32>,
    /// Capitalized condition text, e.g. "Light rain"
    pub description: String,
    /// Provider icon code, e.g. "10d"
    pub icon: String,
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees
    pub wind_deg: Option<u16>,
    /// Cloudiness in percent
    pub clouds: Option<u8>,
    /// Visibility in meters
    pub visibility: Option<u32>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    /// Units the numbers are expressed in
    pub units: Units,
}

impl CurrentWeather {
    /// URL of the condition icon
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// One forecast slot (the provider reports every three hours)
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temperature: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub description: String,
    pub icon: String,
}

impl ForecastEntry {
    /// Calendar date of this slot (UTC)
    pub fn date(&self) -> NaiveDate {
        self.time.date_naive()
    }

    /// Short day label, e.g. "Mon, Oct 19"
    pub fn day_label(&self) -> String {
        self.time.format("%a, %b %d").to_string()
    }
}

/// Multi-day forecast for one city
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub city: String,
    pub entries: Vec<ForecastEntry>,
    pub units: Units,
}

impl Forecast {
    /// First slot of each calendar date, in order
    pub fn daily(&self) -> Vec<&ForecastEntry> {
        let mut days: Vec<&ForecastEntry> = Vec::new();
        for entry in &self.entries {
            if !days.iter().any(|d| d.date() == entry.date()) {
                days.push(entry);
            }
        }
        days
    }
}

/// Build an icon URL from a provider icon code
pub fn icon_url(icon: &str) -> String {
    ICON_URL_TEMPLATE.replace("{icon}", icon)
}

/// Uppercase the first character and lowercase the rest
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
