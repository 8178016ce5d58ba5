//! End-to-end lookups against a mock OpenWeather server.

use chrono::Utc;
use weatherboard_core::{
    AppState, Dashboard, MemoryStore, MemorySurface, OpenWeatherGateway, Panel, Slot, TipLine,
    UnitSystem,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn dashboard(
    server: &MockServer,
) -> Dashboard<OpenWeatherGateway, MemorySurface, MemoryStore, Utc> {
    let gateway =
        OpenWeatherGateway::with_base_url("KEY".into(), &format!("{}/data/2.5", server.uri()))
            .unwrap();
    let state = AppState {
        default_city: "Seoul".into(),
        ..AppState::default()
    };

    Dashboard::new(gateway, MemorySurface::default(), MemoryStore::default(), state)
        .with_time_zone(Utc)
}

#[tokio::test]
async fn forecast_outage_still_shows_current_conditions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Busan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coord": { "lon": 129.04, "lat": 35.1 },
            "weather": [{ "id": 500, "description": "실 비", "icon": "10d" }],
            "main": { "temp": 3.6, "humidity": 91 },
            "wind": { "speed": 11.3 },
            "name": "Busan"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut dash = dashboard(&server).await;
    let query = weatherboard_core::LocationQuery::place(" Busan ").unwrap();

    assert!(dash.lookup(query).await);

    let s = dash.surface();
    assert_eq!(s.text(Slot::Temperature), Some("4°C"));
    assert_eq!(s.text(Slot::BoostHint), Some("🌬 강풍 — 비행 / 드래곤 / 에스퍼 타입 부스트"));
    assert_eq!(
        s.tip,
        vec![
            TipLine::Plain("아우터: 패딩".into()),
            TipLine::Plain("상의: 방한용품 필수".into()),
        ]
    );
    assert!(s.hourly.is_empty());
    assert!(s.daily.is_empty());
    assert!(s.is_visible(Panel::Details));
    assert_eq!(s.recent, vec!["Busan"]);
    assert_eq!(dash.state().units, UnitSystem::Celsius);
}

#[tokio::test]
async fn unknown_city_routes_to_error_panel() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut dash = dashboard(&server).await;

    assert!(!dash.lookup(weatherboard_core::LocationQuery::place("Nowhere").unwrap()).await);

    let s = dash.surface();
    assert_eq!(s.text(Slot::ErrorMessage), Some("도시를 찾을 수 없습니다."));
    assert!(s.is_visible(Panel::Error));
    assert!(!s.is_visible(Panel::Details));
    assert!(s.recent.is_empty());
}
