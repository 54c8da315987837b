//! Weather feed client for Skydeck
//!
//! Fetches one local calendar day of hourly observations from a
//! Meteomatics-style CSV API and returns a normalized, enriched record
//! set for the dashboard to render.

pub mod backoff;
pub mod catalog;
pub mod parse;
pub mod provider;
pub mod symbols;
pub mod types;
pub mod wind;
pub mod window;

pub use backoff::Backoff;
pub use catalog::CityCatalog;
pub use provider::{ApiCredentials, WeatherClient};
pub use symbols::WeatherCondition;
pub use types::*;
