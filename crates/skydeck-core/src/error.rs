//! Application-level error hierarchy.
//!
//! Leaf crates own their error enums; `AppError` aggregates them for the
//! presentation layer, which shows `user_message()` and never renders
//! partial data on failure.

use thiserror::Error;

use skydeck_auth::AuthError;
use skydeck_weather::WeatherError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("provider credentials are not configured")]
    MissingCredentials,

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredentials => {
                "Weather provider credentials are missing. Set SKYDECK_API_USERNAME and SKYDECK_API_PASSWORD."
            }
            Self::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// User-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Weather(e) => e.user_message(),
            Self::Auth(e) => e.user_message(),
            Self::Config(e) => e.user_message(),
            Self::Io(_) => "A file operation failed. Please try again.",
            Self::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}
