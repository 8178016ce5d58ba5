//! Core library for the `weatherboard` dashboard.
//!
//! This crate defines:
//! - Configuration handling
//! - The OpenWeather gateway (current conditions, forecast, today's rain)
//! - Pure derivations: clothing tips, boost hints, background themes
//! - The dashboard adapter that renders onto any [`RenderSurface`]
//!
//! It is used by `weatherboard-cli`, but the surface, recent-city store and
//! geolocation source are traits so other front ends can plug in.

pub mod config;
pub mod dashboard;
pub mod derive;
pub mod error;
pub mod gateway;
pub mod location;
pub mod model;
pub mod recent;
pub mod surface;

pub use config::Config;
pub use dashboard::{AppState, Dashboard};
pub use derive::{BackgroundCategory, BoostHint, BoostTable, ClothingTip, LegacyBoost, TipLine};
pub use error::{GatewayError, LocationError, StoreError};
pub use gateway::{OpenWeatherGateway, WeatherGateway, gateway_from_config};
pub use location::{FixedLocation, GeolocationSource};
pub use model::{Coordinates, CurrentConditions, Forecast, ForecastEntry, LocationQuery, UnitSystem};
pub use recent::{JsonFileStore, MemoryStore, RecentStore};
pub use surface::{ForecastCard, MemorySurface, Panel, RenderSurface, Slot};
