//! Local-day fetch window.
//!
//! The provider is asked for `[local midnight, local 23:59:59]` of the
//! day containing `as_of`, expressed in UTC in the request URL.

use chrono::{DateTime, Days, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::types::WeatherError;

const UTC_SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One local calendar day, bounding a single provider request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl FetchWindow {
    /// The local calendar day containing `as_of`.
    pub fn local_day_of(as_of: &DateTime<Tz>) -> Result<Self, WeatherError> {
        let tz = as_of.timezone();
        let date = as_of.date_naive();
        let midnight = date.and_time(NaiveTime::MIN);
        let last_second = midnight
            .checked_add_days(Days::new(1))
            .and_then(|next| next.checked_sub_signed(chrono::Duration::seconds(1)))
            .ok_or_else(|| WeatherError::Parse(format!("day out of range: {date}")))?;

        Ok(Self {
            start: resolve_local(tz, midnight)?,
            end: resolve_local(tz, last_second)?,
        })
    }

    /// `start--end` in UTC, second precision, as the provider URL wants it.
    pub fn interval_param(&self) -> String {
        format!("{}--{}", format_utc(&self.start), format_utc(&self.end))
    }
}

/// UTC ISO-8601 with second precision and trailing `Z`.
pub fn format_utc(instant: &DateTime<Tz>) -> String {
    instant
        .with_timezone(&Utc)
        .format(UTC_SECOND_FORMAT)
        .to_string()
}

// DST shifts can make a wall-clock time ambiguous or nonexistent; the
// earliest valid instant is taken, and a time that does not exist at all
// is reported instead of guessed around.
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Result<DateTime<Tz>, WeatherError> {
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| WeatherError::Parse(format!("{naive} does not exist in {tz}")))
}
