//! Provider CSV parsing.
//!
//! The feed is `;`-delimited with a header row; columns are located by
//! name so parameter order in the response does not matter. Timestamps
//! come back in UTC and are converted into the requested city's zone.

use chrono::{DateTime, NaiveDateTime, Timelike};
use chrono_tz::Tz;

use crate::symbols::WeatherCondition;
use crate::types::{HourlyObservation, WeatherError};
use crate::wind;

const DELIMITER: char = ';';

const COL_TIME: &str = "validdate";
const COL_TEMPERATURE: &str = "t_2m:C";
const COL_PRECIPITATION: &str = "precip_1h:mm";
const COL_SYMBOL: &str = "weather_symbol_1h:idx";
const COL_WIND_SPEED: &str = "wind_speed_10m:ms";
const COL_WIND_DIR: &str = "wind_dir_10m:d";
const COL_SUNRISE: &str = "sunrise:sql";
const COL_SUNSET: &str = "sunset:sql";

// `:sql` parameters come back as SQL-style datetimes.
const SQL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column positions resolved from the header row.
#[derive(Debug)]
struct Columns {
    time: usize,
    temperature: usize,
    precipitation: usize,
    symbol: usize,
    wind_speed: usize,
    wind_dir: usize,
    // Optional: preserved when present, never required for success.
    sunrise: Option<usize>,
    sunset: Option<usize>,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self, WeatherError> {
        let names: Vec<&str> = header.split(DELIMITER).map(str::trim).collect();
        Ok(Self {
            time: require(&names, COL_TIME)?,
            temperature: require(&names, COL_TEMPERATURE)?,
            precipitation: require(&names, COL_PRECIPITATION)?,
            symbol: require(&names, COL_SYMBOL)?,
            wind_speed: require(&names, COL_WIND_SPEED)?,
            wind_dir: require(&names, COL_WIND_DIR)?,
            sunrise: position(&names, COL_SUNRISE),
            sunset: position(&names, COL_SUNSET),
        })
    }
}

fn position(names: &[&str], name: &str) -> Option<usize> {
    names.iter().position(|n| *n == name)
}

fn require(names: &[&str], name: &str) -> Result<usize, WeatherError> {
    position(names, name).ok_or_else(|| WeatherError::Parse(format!("missing column {name}")))
}

/// Parse a provider response body into chronological hourly observations.
///
/// Rows are sorted by timestamp and duplicate local hours are rejected;
/// the row count itself is not checked, DST-shifted days are shorter or
/// longer than 24 hours.
pub fn parse_csv_day(body: &str, tz: Tz) -> Result<Vec<HourlyObservation>, WeatherError> {
    let mut lines = body.lines().map(str::trim).filter(|line| !line.is_empty());

    let header = lines
        .next()
        .ok_or_else(|| WeatherError::Parse("empty response body".to_string()))?;
    let columns = Columns::from_header(header)?;

    let mut observations = Vec::new();
    for (index, line) in lines.enumerate() {
        // Header is line 1.
        observations.push(parse_row(line, &columns, tz, index + 2)?);
    }

    if observations.is_empty() {
        return Err(WeatherError::Parse("no observation rows".to_string()));
    }

    observations.sort_by_key(|obs| obs.valid_time);
    for pair in observations.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.valid_time.date_naive() == b.valid_time.date_naive()
            && a.valid_time.hour() == b.valid_time.hour()
        {
            return Err(WeatherError::Parse(format!(
                "duplicate hour in response: {}",
                b.valid_time
            )));
        }
    }

    Ok(observations)
}

fn parse_row(
    line: &str,
    columns: &Columns,
    tz: Tz,
    line_number: usize,
) -> Result<HourlyObservation, WeatherError> {
    let fields: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();

    let valid_time = DateTime::parse_from_rfc3339(field(&fields, columns.time, COL_TIME, line_number)?)
        .map_err(|err| {
            WeatherError::Parse(format!("line {line_number}: bad {COL_TIME}: {err}"))
        })?
        .with_timezone(&tz);

    let temperature_c = parse_f64(field(&fields, columns.temperature, COL_TEMPERATURE, line_number)?, COL_TEMPERATURE, line_number)?;
    let precipitation_mm = parse_f64(field(&fields, columns.precipitation, COL_PRECIPITATION, line_number)?, COL_PRECIPITATION, line_number)?;
    // The symbol column is an index; some feeds emit it with a decimal point.
    let weather_symbol = parse_f64(field(&fields, columns.symbol, COL_SYMBOL, line_number)?, COL_SYMBOL, line_number)? as i64;
    let wind_speed_mps = parse_f64(field(&fields, columns.wind_speed, COL_WIND_SPEED, line_number)?, COL_WIND_SPEED, line_number)?;
    let wind_direction_deg = parse_f64(field(&fields, columns.wind_dir, COL_WIND_DIR, line_number)?, COL_WIND_DIR, line_number)?;

    let sunrise = optional_datetime(&fields, columns.sunrise);
    let sunset = optional_datetime(&fields, columns.sunset);

    Ok(HourlyObservation {
        valid_time,
        temperature_c,
        precipitation_mm,
        weather_symbol,
        wind_speed_mps,
        wind_direction_deg,
        condition: WeatherCondition::from_symbol(weather_symbol).label(),
        wind_direction_cardinal: wind::cardinal_from_degrees(wind_direction_deg).to_string(),
        wind_speed_kph: wind::mps_to_kph(wind_speed_mps),
        sunrise,
        sunset,
    })
}

fn field<'a>(
    fields: &[&'a str],
    index: usize,
    name: &str,
    line_number: usize,
) -> Result<&'a str, WeatherError> {
    fields
        .get(index)
        .copied()
        .ok_or_else(|| WeatherError::Parse(format!("line {line_number}: missing {name} field")))
}

fn parse_f64(raw: &str, name: &str, line_number: usize) -> Result<f64, WeatherError> {
    raw.parse().map_err(|_| {
        WeatherError::Parse(format!("line {line_number}: bad {name} value {raw:?}"))
    })
}

// Lenient on purpose: an unparseable sunrise/sunset is dropped, not an error.
fn optional_datetime(fields: &[&str], index: Option<usize>) -> Option<NaiveDateTime> {
    let raw = index.and_then(|i| fields.get(i).copied())?;
    NaiveDateTime::parse_from_str(raw, SQL_DATETIME_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
}
