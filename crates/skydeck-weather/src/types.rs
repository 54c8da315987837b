use chrono::{DateTime, NaiveDateTime, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A city the dashboard can show weather for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityEntry {
    /// Display name, also the catalog key (e.g. "Cambridge, UK").
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA zone the local-day window and timestamps are expressed in.
    pub time_zone: Tz,
}

/// One hour of observed/forecast weather, in the city's local time.
///
/// The raw provider columns keep their units (°C, mm, m/s, degrees);
/// `condition`, `wind_direction_cardinal` and `wind_speed_kph` are derived
/// at parse time for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyObservation {
    pub valid_time: DateTime<Tz>,
    pub temperature_c: f64,
    pub precipitation_mm: f64,
    pub weather_symbol: i64,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: f64,
    pub condition: String,
    pub wind_direction_cardinal: String,
    pub wind_speed_kph: f64,
    /// Fetched for forward compatibility, unused by the dashboard.
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
}

/// A full local day of hourly observations for one city.
///
/// Built fresh on every fetch and handed to the presentation layer as
/// plain data; nothing here is cached or rendered.
#[derive(Debug, Clone, Serialize)]
pub struct DailyWeatherSnapshot {
    pub city: CityEntry,
    /// Chronological, one local calendar day, hourly step.
    pub observations: Vec<HourlyObservation>,
    /// The instant the fetch was made, in the city's zone.
    pub fetched_at: DateTime<Tz>,
}

impl DailyWeatherSnapshot {
    /// Select the observation for `as_of`'s local hour of day.
    ///
    /// Matches on the integer hour (0-23), never on a formatted clock
    /// label, so noon/midnight formatting cannot pick the wrong row.
    pub fn observation_at(&self, as_of: &DateTime<Tz>) -> Result<&HourlyObservation, WeatherError> {
        let hour = as_of.with_timezone(&self.city.time_zone).hour();
        self.observations
            .iter()
            .find(|obs| obs.valid_time.hour() == hour)
            .ok_or(WeatherError::NoMatchingHour { hour })
    }
}

/// High and low temperature over one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailySummary {
    pub high_c: f64,
    pub low_c: f64,
}

impl DailySummary {
    /// Max/min temperature over a non-empty observation set.
    pub fn from_observations(observations: &[HourlyObservation]) -> Result<Self, WeatherError> {
        let mut temps = observations.iter().map(|obs| obs.temperature_c);
        let first = temps.next().ok_or(WeatherError::EmptyObservations)?;
        let (high_c, low_c) = temps.fold((first, first), |(hi, lo), t| (hi.max(t), lo.min(t)));
        Ok(Self { high_c, low_c })
    }

    pub fn for_snapshot(snapshot: &DailyWeatherSnapshot) -> Result<Self, WeatherError> {
        Self::from_observations(&snapshot.observations)
    }
}

/// Weather feed errors.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no observation for local hour {hour}")]
    NoMatchingHour { hour: u32 },

    #[error("no observations to summarize")]
    EmptyObservations,

    #[error("unknown city: {0}")]
    UnknownCity(String),
}

impl WeatherError {
    /// User-friendly message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) => "Unable to fetch weather data. Check your connection.",
            Self::Provider { .. } => "The weather service rejected the request.",
            Self::Parse(_) => "The weather service returned unexpected data.",
            Self::NoMatchingHour { .. } => "No weather data for the current hour.",
            Self::EmptyObservations => "No weather data for today.",
            Self::UnknownCity(_) => "That city is not in the catalog.",
        }
    }
}
