//! Error types for skywatch
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for skywatch services
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{}", friendly_network_error(.0))]
    Network(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid city name: {0}")]
    InvalidCity(String),

    #[error("401: Invalid API key")]
    Unauthorized,

    #[error("404: City '{0}' not found")]
    CityNotFound(String),

    #[error("Server error ({0}). Try again later")]
    Server(u16),

    #[error("Unexpected HTTP status {0}")]
    Http(u16),
}

/// Result type alias for skywatch
pub type Result<T> = std::result::Result<T, AppError>;

fn friendly_network_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        return "Request timed out. Check your connection.".to_string();
    }
    if e.is_connect() {
        if let Some(url) = e.url() {
            return format!(
                "Connection error: could not reach {}. Please check your internet.",
                url.host_str().unwrap_or("server")
            );
        }
        return "Connection error. Please check your internet.".to_string();
    }
    if e.is_builder() {
        return "Invalid request URL".to_string();
    }
    if e.is_decode() {
        return "Invalid response from weather service".to_string();
    }
    format!("Network error: {e}")
}
