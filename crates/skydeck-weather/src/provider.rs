//! Weather feed client.
//!
//! Builds the time-windowed provider request for one local day of hourly
//! observations, authenticates with HTTP basic auth, and turns the CSV
//! response into a [`DailyWeatherSnapshot`].

use std::sync::Arc;
use std::time::Duration;

use chrono::DateTime;
use chrono_tz::Tz;
use reqwest::Client;

use crate::backoff::{send_with_backoff, Backoff};
use crate::parse;
use crate::types::{CityEntry, DailyWeatherSnapshot, WeatherError};
use crate::window::FetchWindow;

/// Requested parameters, one CSV column each. Sunrise/sunset ride along
/// for forward compatibility and are not required downstream.
const PARAMETERS: &str =
    "t_2m:C,precip_1h:mm,weather_symbol_1h:idx,wind_speed_10m:ms,wind_dir_10m:d,sunrise:sql,sunset:sql";

const DEFAULT_BASE_URL: &str = "https://api.meteomatics.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Provider-issued basic-auth credentials, supplied by the caller.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub username: String,
    pub password: String,
}

/// Client for the hourly weather feed. Stateless between calls; fetching
/// the same city and instant twice is safe and independent.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Arc<Client>,
    base_url: String,
    credentials: ApiCredentials,
    backoff: Backoff,
}

impl WeatherClient {
    pub fn new(credentials: ApiCredentials) -> Result<Self, WeatherError> {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(credentials: ApiCredentials, base_url: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            backoff: Backoff::default(),
        })
    }

    /// Replace the default no-retry policy.
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    fn day_url(&self, window: &FetchWindow, city: &CityEntry) -> String {
        format!(
            "{}/{}:PT1H/{}/{},{}/csv",
            self.base_url,
            window.interval_param(),
            PARAMETERS,
            city.latitude,
            city.longitude
        )
    }

    /// Fetch the local calendar day of `as_of` for `city`.
    ///
    /// `as_of` is converted into the city's zone first, so the window is
    /// the city's local day no matter what zone the caller passes.
    #[tracing::instrument(skip(self, city, as_of), fields(city = %city.name))]
    pub async fn fetch_day(
        &self,
        city: &CityEntry,
        as_of: DateTime<Tz>,
    ) -> Result<DailyWeatherSnapshot, WeatherError> {
        let as_of = as_of.with_timezone(&city.time_zone);
        let window = FetchWindow::local_day_of(&as_of)?;
        let url = self.day_url(&window, city);
        tracing::debug!("requesting weather feed: {url}");

        let response = send_with_backoff(&self.backoff, || {
            self.client
                .get(&url)
                .basic_auth(&self.credentials.username, Some(&self.credentials.password))
                .send()
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("provider rejected request: {status} {body}");
            return Err(WeatherError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let observations = parse::parse_csv_day(&body, city.time_zone)?;
        tracing::info!(
            "fetched {} hourly observations for {}",
            observations.len(),
            city.name
        );

        Ok(DailyWeatherSnapshot {
            city: city.clone(),
            observations,
            fetched_at: as_of,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::London;

    fn client() -> WeatherClient {
        WeatherClient::with_base_url(
            ApiCredentials {
                username: "user".to_string(),
                password: "pass".to_string(),
            },
            "https://api.example.com/",
        )
        .unwrap()
    }

    #[test]
    fn url_has_the_interval_parameters_and_coordinates() {
        let city = CityEntry {
            name: "Cambridge, UK".to_string(),
            latitude: 52.2053,
            longitude: 0.1218,
            time_zone: London,
        };
        let as_of = London.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).single().unwrap();
        let window = FetchWindow::local_day_of(&as_of).unwrap();

        let url = client().day_url(&window, &city);
        assert_eq!(
            url,
            format!(
                "https://api.example.com/2024-05-31T23:00:00Z--2024-06-01T22:59:59Z:PT1H/{PARAMETERS}/52.2053,0.1218/csv"
            )
        );
    }
}
