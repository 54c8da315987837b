use std::env;
use std::process::ExitCode;

use anyhow::Result;
use chrono::Utc;

use skydeck_auth::UserRegistry;
use skydeck_core::{AppError, Config, Session};
use skydeck_weather::{DailySummary, DailyWeatherSnapshot, WeatherClient, WeatherError};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize core
    skydeck_core::init()?;

    let (config, _validation) = Config::load_validated()?;

    let registry = UserRegistry::from_entries(config.users.clone());
    let mut session = Session::new(config.weather.default_city.clone());

    // Login gate: enforced whenever accounts are configured.
    if !registry.is_empty() {
        let username = env::var("SKYDECK_USER").unwrap_or_default();
        let password = env::var("SKYDECK_PASSWORD").unwrap_or_default();
        if let Err(err) = session.login(&registry, &username, &password) {
            eprintln!("{}", AppError::from(err).user_message());
            return Ok(ExitCode::FAILURE);
        }
        println!("Welcome! You are logged in as: {username}");
    }

    // Optional city override: `skydeck "Sydney, Australia"`.
    if let Some(city) = env::args().nth(1) {
        session.select_city(city);
    }

    let catalog = config.catalog();
    let Some(city) = catalog.get(&session.selected_city) else {
        let err = AppError::from(WeatherError::UnknownCity(session.selected_city.clone()));
        eprintln!("{}", err.user_message());
        eprintln!(
            "Available cities: {}",
            catalog.names().collect::<Vec<_>>().join(", ")
        );
        return Ok(ExitCode::FAILURE);
    };

    let credentials = match config.provider.credentials() {
        Ok(credentials) => credentials,
        Err(err) => {
            eprintln!("{}", AppError::from(err).user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    let client = WeatherClient::with_base_url(credentials, &config.provider.base_url)?
        .with_backoff(config.provider.backoff());

    let as_of = Utc::now().with_timezone(&city.time_zone);
    match client.fetch_day(city, as_of).await {
        Ok(snapshot) => {
            render(&snapshot);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!("weather fetch failed: {err}");
            eprintln!("{}", AppError::from(err).user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn render(snapshot: &DailyWeatherSnapshot) {
    println!();
    println!("Today's weather in {}.", snapshot.city.name);
    println!();

    match snapshot.observation_at(&snapshot.fetched_at) {
        Ok(current) => {
            println!("  {:.0} °C, {}", current.temperature_c, current.condition);
            println!("  Local time: {}", snapshot.fetched_at.format("%H:%M"));
            match DailySummary::for_snapshot(snapshot) {
                Ok(summary) => {
                    println!("  H: {:.0} °C / L: {:.0} °C", summary.high_c, summary.low_c);
                }
                Err(err) => println!("  {}", AppError::from(err).user_message()),
            }
            println!(
                "  Wind: {:.1} km/h, {}",
                current.wind_speed_kph, current.wind_direction_cardinal
            );
        }
        Err(err) => println!("  {}", AppError::from(err).user_message()),
    }

    println!();
    println!("Hourly overview:");
    println!(
        "{:<6} {:>8} {:>8}  {:<32} {:>10} {:>5}",
        "Time", "Temp °C", "Rain mm", "Conditions", "Wind km/h", "Dir"
    );
    for obs in &snapshot.observations {
        println!(
            "{:<6} {:>8.1} {:>8.1}  {:<32} {:>10.1} {:>5}",
            obs.valid_time.format("%H:%M"),
            obs.temperature_c,
            obs.precipitation_mm,
            obs.condition,
            obs.wind_speed_kph,
            obs.wind_direction_cardinal
        );
    }
}
