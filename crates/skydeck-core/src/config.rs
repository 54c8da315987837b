use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use skydeck_auth::UserEntry;
use skydeck_weather::{ApiCredentials, Backoff, CityCatalog, CityEntry};

use crate::error::ConfigError;

/// Environment variables that override file-based provider credentials,
/// so secrets can stay out of the config file entirely.
pub const ENV_API_USERNAME: &str = "SKYDECK_API_USERNAME";
pub const ENV_API_PASSWORD: &str = "SKYDECK_API_PASSWORD";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Weather provider connection settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Dashboard weather settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Dashboard accounts; an empty list disables the login gate.
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the weather feed API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Provider account. Usually left empty here and supplied via
    /// SKYDECK_API_USERNAME / SKYDECK_API_PASSWORD instead.
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,

    /// Retries after a transient failure; 0 keeps fetches single-shot.
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default = "default_retry_initial_ms")]
    pub retry_initial_ms: u64,
    #[serde(default = "default_retry_max_ms")]
    pub retry_max_ms: u64,
}

fn default_base_url() -> String {
    "https://api.meteomatics.com".to_string()
}

fn default_retry_initial_ms() -> u64 {
    200
}

fn default_retry_max_ms() -> u64 {
    5000
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: String::new(),
            password: String::new(),
            max_retries: 0,
            retry_initial_ms: default_retry_initial_ms(),
            retry_max_ms: default_retry_max_ms(),
        }
    }
}

impl ProviderConfig {
    /// Resolve credentials, preferring the environment over the file.
    pub fn credentials(&self) -> Result<ApiCredentials, ConfigError> {
        resolve_credentials(
            &self.username,
            &self.password,
            std::env::var(ENV_API_USERNAME).ok(),
            std::env::var(ENV_API_PASSWORD).ok(),
        )
    }

    pub fn backoff(&self) -> Backoff {
        Backoff::new(self.max_retries, self.retry_initial_ms, self.retry_max_ms)
    }
}

fn resolve_credentials(
    file_username: &str,
    file_password: &str,
    env_username: Option<String>,
    env_password: Option<String>,
) -> Result<ApiCredentials, ConfigError> {
    let pick = |env: Option<String>, file: &str| {
        env.filter(|v| !v.is_empty())
            .unwrap_or_else(|| file.to_string())
    };

    let username = pick(env_username, file_username);
    let password = pick(env_password, file_password);

    if username.is_empty() || password.is_empty() {
        return Err(ConfigError::MissingCredentials);
    }

    Ok(ApiCredentials { username, password })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// City shown when the session has not selected one yet
    #[serde(default = "default_city_name")]
    pub default_city: String,

    /// Extra catalog entries; a same-name entry overrides the builtin.
    #[serde(default)]
    pub extra_cities: Vec<CityEntry>,
}

fn default_city_name() -> String {
    "Cambridge, UK".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            default_city: default_city_name(),
            extra_cities: Vec::new(),
        }
    }
}

impl Config {
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skydeck");
        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, creating the default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents).context("Failed to write config file")?;
        Ok(())
    }

    /// Load configuration and validate it.
    ///
    /// Warnings are logged; errors abort the load.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// The city catalog with config-supplied extras applied.
    pub fn catalog(&self) -> CityCatalog {
        let mut catalog = CityCatalog::builtin();
        catalog.extend(self.weather.extra_cities.iter().cloned());
        catalog
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        match url::Url::parse(&self.provider.base_url) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
            Ok(parsed) => {
                result.add_error(
                    "provider.base_url",
                    format!("Unsupported scheme: {}", parsed.scheme()),
                );
            }
            Err(err) => {
                result.add_error("provider.base_url", format!("Invalid URL: {err}"));
            }
        }

        if self.provider.credentials().is_err() {
            result.add_error(
                "provider.username",
                "No provider credentials in config or environment",
            );
        }

        if self.provider.max_retries > 10 {
            result.add_warning("provider.max_retries", "Unusually high retry count (>10)");
        }

        if self.catalog().get(&self.weather.default_city).is_none() {
            result.add_error(
                "weather.default_city",
                format!("Not in the city catalog: {}", self.weather.default_city),
            );
        }

        if self.users.is_empty() {
            result.add_warning("users", "No accounts configured - login gate is disabled");
        }

        result
    }
}
