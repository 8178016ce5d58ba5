use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::GatewayError,
    model::{Coordinates, CurrentConditions, Forecast, ForecastEntry, LocationQuery, UnitSystem},
};

use super::WeatherGateway;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const LANGUAGE: &str = "kr";

#[derive(Debug, Clone)]
pub struct OpenWeatherGateway {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherGateway {
    pub fn new(api_key: String) -> Result<Self, reqwest::Error> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the gateway at another host, e.g. a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(
        &self,
        endpoint: &str,
        location: &[(&str, String)],
        units: UnitSystem,
    ) -> Result<(reqwest::StatusCode, String), reqwest::Error> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!("GET {url} {location:?} units={}", units.as_query());

        let res = self
            .http
            .get(&url)
            .query(location)
            .query(&[
                ("appid", self.api_key.as_str()),
                ("units", units.as_query()),
                ("lang", LANGUAGE),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        Ok((status, body))
    }
}

fn location_params(query: &LocationQuery) -> Vec<(&'static str, String)> {
    match query {
        LocationQuery::PlaceName(name) => vec![("q", name.clone())],
        LocationQuery::Coordinates(coords) => coords_params(*coords),
    }
}

fn coords_params(coords: Coordinates) -> Vec<(&'static str, String)> {
    vec![("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())]
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i32,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl TryFrom<OwCurrentResponse> for CurrentConditions {
    type Error = serde_json::Error;

    fn try_from(raw: OwCurrentResponse) -> Result<Self, Self::Error> {
        use serde::de::Error as _;

        let weather = raw
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| serde_json::Error::custom("`weather` array is empty"))?;

        Ok(CurrentConditions {
            city: raw.name,
            temperature: raw.main.temp,
            description: weather.description,
            humidity_pct: raw.main.humidity,
            wind_speed: raw.wind.speed,
            condition_code: weather.id,
            icon: weather.icon,
            coords: Coordinates::new(raw.coord.lat, raw.coord.lon),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
    #[serde(default)]
    pop: f64,
    dt_txt: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Option<Vec<serde_json::Value>>,
}

impl OwForecastEntry {
    fn normalize(self) -> Option<ForecastEntry> {
        let time = unix_to_utc(self.dt)?;
        let weather = self.weather.into_iter().next()?;

        Some(ForecastEntry {
            time,
            temperature: self.main.temp,
            condition_code: weather.id,
            pop: self.pop,
            icon: weather.icon,
            time_text: self.dt_txt,
        })
    }
}

/// Turn a forecast body into entries, dropping anything unusable.
fn parse_forecast(body: &str) -> Forecast {
    let parsed: OwForecastResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Discarding unparsable forecast payload: {e}");
            return Forecast::default();
        }
    };

    let Some(list) = parsed.list else {
        tracing::warn!("Forecast payload has no `list`; treating as empty");
        return Forecast::default();
    };

    let entries = list
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<OwForecastEntry>(value) {
            Ok(raw) => raw.normalize(),
            Err(e) => {
                tracing::debug!("Skipping malformed forecast entry: {e}");
                None
            }
        })
        .collect();

    Forecast { entries }
}

#[async_trait]
impl WeatherGateway for OpenWeatherGateway {
    async fn fetch_current(
        &self,
        query: &LocationQuery,
        units: UnitSystem,
    ) -> Result<CurrentConditions, GatewayError> {
        let (status, body) = self.get("weather", &location_params(query), units).await?;

        if !status.is_success() {
            tracing::info!(
                "Current weather lookup for {query:?} failed with status {status}: {}",
                truncate_body(&body)
            );
            return Err(GatewayError::LocationNotFound {
                status: status.as_u16(),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        Ok(CurrentConditions::try_from(parsed)?)
    }

    async fn fetch_forecast(&self, coords: Coordinates, units: UnitSystem) -> Forecast {
        let (status, body) = match self.get("forecast", &coords_params(coords), units).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Forecast request failed: {e}");
                return Forecast::default();
            }
        };

        if !status.is_success() {
            tracing::warn!(
                "Forecast request failed with status {status}: {}",
                truncate_body(&body)
            );
            return Forecast::default();
        }

        parse_forecast(&body)
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
