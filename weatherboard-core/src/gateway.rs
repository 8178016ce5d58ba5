use async_trait::async_trait;
use chrono::Local;
use std::fmt::Debug;

use crate::{
    Config,
    derive::select_rain_slots,
    error::GatewayError,
    model::{Coordinates, CurrentConditions, Forecast, ForecastEntry, LocationQuery, UnitSystem},
};

pub mod openweather;

pub use openweather::OpenWeatherGateway;

/// Source of current conditions and short-term forecasts.
#[async_trait]
pub trait WeatherGateway: Send + Sync + Debug {
    /// Fails with [`GatewayError::LocationNotFound`] when the provider rejects the query.
    async fn fetch_current(
        &self,
        query: &LocationQuery,
        units: UnitSystem,
    ) -> Result<CurrentConditions, GatewayError>;

    /// Never fails: an unavailable forecast is an empty one.
    async fn fetch_forecast(&self, coords: Coordinates, units: UnitSystem) -> Forecast;

    /// Today's rain slots, always evaluated on a Celsius forecast.
    async fn fetch_today_rain(&self, coords: Coordinates) -> Vec<ForecastEntry> {
        let forecast = self.fetch_forecast(coords, UnitSystem::Celsius).await;
        select_rain_slots(&forecast.entries, &Local::now())
    }
}

/// Construct the OpenWeather gateway from config.
pub fn gateway_from_config(config: &Config) -> anyhow::Result<OpenWeatherGateway> {
    let api_key = config.api_key()?;

    let gateway = match config.base_url.as_deref() {
        Some(base_url) => OpenWeatherGateway::with_base_url(api_key, base_url)?,
        None => OpenWeatherGateway::new(api_key)?,
    };

    Ok(gateway)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = gateway_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn gateway_from_config_uses_configured_base_url() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://localhost:9999/data/2.5/".into()),
            ..Config::default()
        };

        let gateway = gateway_from_config(&cfg).expect("gateway must build");
        assert_eq!(gateway.base_url(), "http://localhost:9999/data/2.5");
    }
}
