//! Condition helpers
//!
//! Keyword-based emoji and weather alerts derived from current conditions.

use crate::config::alerts::{COLD_THRESHOLD, HOT_THRESHOLD};

use super::types::CurrentWeather;

/// Pick an emoji for a condition description
pub fn condition_emoji(description: &str) -> &'static str {
    let d = description.to_lowercase();
    if d.contains("clear") {
        "☀️"
    } else if d.contains("cloud") {
        "☁️"
    } else if d.contains("rain") {
        "🌧️"
    } else if d.contains("snow") {
        "❄️"
    } else if d.contains("thunder") || d.contains("storm") {
        "⛈️"
    } else if d.contains("mist") || d.contains("fog") {
        "🌫️"
    } else {
        "🌤️"
    }
}

/// A condition worth warning the user about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeatherAlert {
    /// Temperature above the heat threshold
    Hot(f64),
    /// Temperature below the cold threshold
    Cold(f64),
    /// Thunderstorm reported
    Storm,
}

impl WeatherAlert {
    /// Short user-facing message
    pub fn message(&self, temperature_symbol: &str) -> String {
        match self {
            WeatherAlert::Hot(t) => format!("🔥 Hot weather alert! {t}{temperature_symbol}"),
            WeatherAlert::Cold(t) => format!("❄️ Cold weather alert! {t}{temperature_symbol}"),
            WeatherAlert::Storm => "⛈️ Storm alert! Stay safe!".to_string(),
        }
    }
}

/// Alerts raised by the current conditions
pub fn alerts(weather: &CurrentWeather) -> Vec<WeatherAlert> {
    let mut out = Vec::new();

    if let Some(t) = weather.temperature {
        if t > HOT_THRESHOLD {
            out.push(WeatherAlert::Hot(t));
        } else if t < COLD_THRESHOLD {
            out.push(WeatherAlert::Cold(t));
        }
    }

    let d = weather.description.to_lowercase();
    if d.contains("storm") || d.contains("thunder") {
        out.push(WeatherAlert::Storm);
    }

    out
}
