//! End-to-end tests for the weather feed client against a mock provider.

use chrono::{DateTime, TimeZone, Timelike};
use chrono_tz::Europe::London;
use chrono_tz::Tz;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skydeck_weather::{
    ApiCredentials, Backoff, CityEntry, DailySummary, WeatherClient, WeatherError,
};

const EXPECTED_PATH: &str = "/2024-05-31T23:00:00Z--2024-06-01T22:59:59Z:PT1H/\
    t_2m:C,precip_1h:mm,weather_symbol_1h:idx,wind_speed_10m:ms,wind_dir_10m:d,sunrise:sql,sunset:sql/\
    52.2053,0.1218/csv";

fn cambridge() -> CityEntry {
    CityEntry {
        name: "Cambridge, UK".to_string(),
        latitude: 52.2053,
        longitude: 0.1218,
        time_zone: London,
    }
}

fn as_of() -> DateTime<Tz> {
    London.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).single().unwrap()
}

fn client_for(server: &MockServer) -> WeatherClient {
    WeatherClient::with_base_url(
        ApiCredentials {
            username: "apiuser".to_string(),
            password: "apipass".to_string(),
        },
        &server.uri(),
    )
    .unwrap()
}

/// 24 hourly rows covering 2024-06-01 in London (BST, UTC+1).
fn csv_day() -> String {
    let mut body = String::from(
        "validdate;t_2m:C;precip_1h:mm;weather_symbol_1h:idx;wind_speed_10m:ms;wind_dir_10m:d;sunrise:sql;sunset:sql",
    );
    for local_hour in 0..24u32 {
        let utc = London
            .with_ymd_and_hms(2024, 6, 1, local_hour, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&chrono::Utc);
        body.push_str(&format!(
            "\n{};{:.1};0.1;{};3.0;200.0;2024-06-01 04:38:00;2024-06-01 21:07:00",
            utc.format("%Y-%m-%dT%H:%M:%SZ"),
            8.0 + local_hour as f64,
            if local_hour < 4 { 101 } else { 1 },
        ));
    }
    body
}

#[tokio::test]
async fn fetches_and_enriches_a_full_day() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EXPECTED_PATH))
        .and(basic_auth("apiuser", "apipass"))
        .respond_with(ResponseTemplate::new(200).set_body_string(csv_day()))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client_for(&server)
        .fetch_day(&cambridge(), as_of())
        .await
        .unwrap();

    assert_eq!(snapshot.observations.len(), 24);
    assert_eq!(snapshot.city.name, "Cambridge, UK");
    assert_eq!(snapshot.fetched_at, as_of());

    let first = &snapshot.observations[0];
    assert_eq!(first.valid_time.hour(), 0);
    assert_eq!(first.condition, "Clear sky (night)");
    assert_eq!(first.wind_direction_cardinal, "S");
    assert_eq!(first.wind_speed_kph, 10.8);

    let last = &snapshot.observations[23];
    assert_eq!(last.valid_time.hour(), 23);
    assert_eq!(last.temperature_c, 31.0);
}

#[tokio::test]
async fn current_hour_and_summary_from_a_fetched_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(csv_day()))
        .mount(&server)
        .await;

    let snapshot = client_for(&server)
        .fetch_day(&cambridge(), as_of())
        .await
        .unwrap();

    let current = snapshot.observation_at(&as_of()).unwrap();
    assert_eq!(current.valid_time.hour(), 14);
    assert_eq!(current.temperature_c, 22.0);

    let summary = DailySummary::for_snapshot(&snapshot).unwrap();
    assert_eq!(summary.high_c, 31.0);
    assert_eq!(summary.low_c, 8.0);
}

#[tokio::test]
async fn provider_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Invalid credentials"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_day(&cambridge(), as_of())
        .await
        .unwrap_err();

    match err {
        WeatherError::Provider { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "Invalid credentials");
        }
        other => panic!("expected Provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not csv</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_day(&cambridge(), as_of())
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn transient_provider_failure_is_retried_when_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(csv_day()))
        .mount(&server)
        .await;

    let client = client_for(&server).with_backoff(Backoff::new(2, 1, 10));
    let snapshot = client.fetch_day(&cambridge(), as_of()).await.unwrap();
    assert_eq!(snapshot.observations.len(), 24);
}
