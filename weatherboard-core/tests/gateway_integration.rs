//! Integration tests for OpenWeatherGateway using wiremock.

use chrono::{Duration, Utc};
use weatherboard_core::{
    Coordinates, GatewayError, LocationQuery, OpenWeatherGateway, UnitSystem, WeatherGateway,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 126.9778, "lat": 37.5683 },
        "weather": [{ "id": 721, "main": "Haze", "description": "연무", "icon": "50d" }],
        "main": { "temp": 21.6, "feels_like": 21.2, "humidity": 48 },
        "wind": { "speed": 4.12, "deg": 250 },
        "dt": 1_714_550_400,
        "name": "Seoul",
        "cod": 200
    })
}

fn forecast_entry(dt: i64, id: i32, pop: f64, dt_txt: &str) -> serde_json::Value {
    serde_json::json!({
        "dt": dt,
        "main": { "temp": 18.3, "humidity": 70 },
        "weather": [{ "id": id, "main": "Rain", "description": "실 비", "icon": "10d" }],
        "pop": pop,
        "dt_txt": dt_txt
    })
}

async fn gateway(server: &MockServer) -> OpenWeatherGateway {
    OpenWeatherGateway::with_base_url("TEST_KEY".into(), &format!("{}/data/2.5", server.uri()))
        .expect("client must build")
}

#[tokio::test]
async fn fetch_current_by_place_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Seoul"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .and(query_param("lang", "kr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    let gw = gateway(&server).await;
    let current = gw
        .fetch_current(&LocationQuery::PlaceName("Seoul".into()), UnitSystem::Celsius)
        .await
        .unwrap();

    assert_eq!(current.city, "Seoul");
    assert_eq!(current.temperature, 21.6);
    assert_eq!(current.description, "연무");
    assert_eq!(current.humidity_pct, 48);
    assert_eq!(current.condition_code, 721);
    assert_eq!(current.icon, "50d");
    assert_eq!(current.coords, Coordinates::new(37.5683, 126.9778));
}

#[tokio::test]
async fn fetch_current_by_coordinates_in_fahrenheit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "37.5"))
        .and(query_param("lon", "127.25"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    let gw = gateway(&server).await;
    let current = gw
        .fetch_current(&LocationQuery::coordinates(37.5, 127.25), UnitSystem::Fahrenheit)
        .await
        .unwrap();

    assert_eq!(current.city, "Seoul");
}

#[tokio::test]
async fn fetch_current_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let gw = gateway(&server).await;
    let err = gw
        .fetch_current(&LocationQuery::PlaceName("Atlantis".into()), UnitSystem::Celsius)
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::LocationNotFound { status: 404 }));
}

#[tokio::test]
async fn fetch_current_with_missing_fields_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "Seoul" })),
        )
        .mount(&server)
        .await;

    let gw = gateway(&server).await;
    let err = gw
        .fetch_current(&LocationQuery::PlaceName("Seoul".into()), UnitSystem::Celsius)
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Malformed(_)));
}

#[tokio::test]
async fn fetch_forecast_parses_entries_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("lat", "37.5"))
        .and(query_param("lon", "127"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cod": "200",
            "list": [
                forecast_entry(1_714_564_800, 500, 0.6, "2024-05-01 12:00:00"),
                forecast_entry(1_714_575_600, 800, 0.0, "2024-05-01 15:00:00"),
            ]
        })))
        .mount(&server)
        .await;

    let gw = gateway(&server).await;
    let forecast = gw
        .fetch_forecast(Coordinates::new(37.5, 127.0), UnitSystem::Celsius)
        .await;

    assert_eq!(forecast.entries.len(), 2);
    assert_eq!(forecast.entries[0].condition_code, 500);
    assert_eq!(forecast.entries[0].time_text, "2024-05-01 12:00:00");
    assert!(forecast.entries[0].time < forecast.entries[1].time);
}

#[tokio::test]
async fn fetch_forecast_on_server_error_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let gw = gateway(&server).await;
    let forecast = gw
        .fetch_forecast(Coordinates::new(37.5, 127.0), UnitSystem::Celsius)
        .await;

    assert!(forecast.is_empty());
}

#[tokio::test]
async fn fetch_forecast_without_list_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "cod": "200" })))
        .mount(&server)
        .await;

    let gw = gateway(&server).await;
    let forecast = gw
        .fetch_forecast(Coordinates::new(37.5, 127.0), UnitSystem::Fahrenheit)
        .await;

    assert!(forecast.is_empty());
}

#[tokio::test]
async fn fetch_today_rain_always_requests_metric() {
    let server = MockServer::start().await;
    let now = Utc::now().timestamp();
    let later = (Utc::now() + Duration::days(3)).timestamp();

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [
                forecast_entry(now, 800, 0.9, "today"),
                forecast_entry(now, 800, 0.1, "today, dry"),
                forecast_entry(later, 501, 1.0, "later"),
            ]
        })))
        .mount(&server)
        .await;

    let gw = gateway(&server).await;
    let slots = gw.fetch_today_rain(Coordinates::new(37.5, 127.0)).await;

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].time_text, "today");
}

#[tokio::test]
async fn fetch_today_rain_on_error_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let gw = gateway(&server).await;
    assert!(gw.fetch_today_rain(Coordinates::new(37.5, 127.0)).await.is_empty());
}
