//! Core application plumbing for Skydeck: configuration, the typed
//! error hierarchy, the dashboard session object, and logging setup.

pub mod config;
pub mod error;
pub mod session;

pub use config::{Config, ProviderConfig, ValidationResult, WeatherConfig};
pub use error::{AppError, ConfigError};
pub use session::Session;

use anyhow::Result;

/// Initialize logging for the application.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Skydeck core initialized");
    Ok(())
}
