//! Presentation adapter: runs lookups and maps their results onto a surface.

use chrono::{Local, TimeZone};

use crate::{
    Config,
    derive::{
        BackgroundCategory, BoostTable, derive_clothing_tip_in, hour_label, normalize_description,
        weekday_label,
    },
    error::GatewayError,
    gateway::WeatherGateway,
    location::GeolocationSource,
    model::{
        CurrentConditions, Forecast, ForecastEntry, LocationQuery, UnitSystem, round_half_up,
    },
    recent::{RecentStore, push_recent},
    surface::{ForecastCard, Panel, RenderSurface, Slot},
};

const HOURLY_CARDS: usize = 8;
const DAILY_CARDS: usize = 5;
const MIDDAY_MARKER: &str = "12:00:00";
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Mutable state shared between lookups.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub units: UnitSystem,
    /// Last successfully fetched conditions.
    pub current: Option<CurrentConditions>,
    pub last_error: Option<String>,
    pub boost_table: BoostTable,
    pub default_city: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            units: config.units,
            current: None,
            last_error: None,
            boost_table: config.boost_table,
            default_city: config.default_city().to_string(),
        }
    }
}

pub struct Dashboard<G, S, R, Tz = Local> {
    gateway: G,
    surface: S,
    store: R,
    tz: Tz,
    state: AppState,
}

impl<G, S, R> Dashboard<G, S, R, Local>
where
    G: WeatherGateway,
    S: RenderSurface,
    R: RecentStore,
{
    pub fn new(gateway: G, surface: S, store: R, state: AppState) -> Self {
        Self {
            gateway,
            surface,
            store,
            tz: Local,
            state,
        }
    }
}

impl<G, S, R, Tz> Dashboard<G, S, R, Tz>
where
    G: WeatherGateway,
    S: RenderSurface,
    R: RecentStore,
    Tz: TimeZone,
{
    /// Render hour and weekday labels in `tz` instead of local time.
    pub fn with_time_zone<Tz2: TimeZone>(self, tz: Tz2) -> Dashboard<G, S, R, Tz2> {
        Dashboard {
            gateway: self.gateway,
            surface: self.surface,
            store: self.store,
            tz,
            state: self.state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn recent_cities(&self) -> Vec<String> {
        self.store.load()
    }

    /// Show the stored list, then look up the device position or the default city.
    pub async fn start(&mut self, geolocation: &dyn GeolocationSource) -> bool {
        self.render_recent_cities();

        match geolocation.current_position().await {
            Ok(coords) => {
                let found = self.lookup(LocationQuery::Coordinates(coords)).await;
                if let Some(city) = self.state.current.as_ref().map(|c| c.city.clone()) {
                    self.surface.set_text(Slot::Input, &city);
                }
                found
            }
            Err(e) => {
                let city = self.state.default_city.clone();
                tracing::info!("Geolocation failed ({e}); falling back to {city}");
                self.lookup(LocationQuery::PlaceName(city)).await
            }
        }
    }

    /// Run the full pipeline for one query. Errors end up on the surface;
    /// the return value only says whether conditions were displayed.
    pub async fn lookup(&mut self, query: LocationQuery) -> bool {
        self.surface.set_visible(Panel::Error, false);
        self.surface.set_visible(Panel::Details, false);

        match self.run_lookup(&query).await {
            Ok(()) => {
                self.state.last_error = None;
                true
            }
            Err(e) => {
                tracing::warn!("Lookup for {query:?} failed: {e}");
                self.show_error(&e);
                false
            }
        }
    }

    async fn run_lookup(&mut self, query: &LocationQuery) -> Result<(), GatewayError> {
        let units = self.state.units;
        tracing::info!("Looking up {query:?} in {units}");

        let current = self.gateway.fetch_current(query, units).await?;
        self.state.current = Some(current.clone());

        let rain_slots = self.gateway.fetch_today_rain(current.coords).await;
        self.render_current(&current, &rain_slots);

        let recorded = match query {
            LocationQuery::PlaceName(name) => Some(name.as_str()),
            LocationQuery::Coordinates(_) => Some(current.city.as_str()).filter(|c| !c.is_empty()),
        };
        if let Some(name) = recorded {
            self.record_recent_city(name);
        }

        let forecast = self.gateway.fetch_forecast(current.coords, units).await;
        self.render_hourly(&forecast);
        self.render_daily(&forecast);

        Ok(())
    }

    pub fn render_current(&mut self, data: &CurrentConditions, rain_slots: &[ForecastEntry]) {
        let units = self.state.units;
        let temp = round_half_up(data.temperature);
        let celsius = units.to_celsius(temp);

        self.surface.set_text(Slot::CityName, &data.city);
        self.surface
            .set_text(Slot::Temperature, &format!("{temp}{}", units.temperature_suffix()));
        self.surface
            .set_text(Slot::Description, normalize_description(&data.description));
        self.surface
            .set_text(Slot::Humidity, &format!("{}%", data.humidity_pct));
        self.surface.set_text(
            Slot::WindSpeed,
            &format!("{}{}", data.wind_speed, units.wind_suffix()),
        );
        self.surface
            .set_text(Slot::Icon, &format!("{ICON_BASE_URL}/{}@2x.png", data.icon));

        self.surface
            .set_theme(BackgroundCategory::from_code(data.condition_code));

        let boost = self
            .state
            .boost_table
            .classify(data.condition_code, data.wind_speed);
        self.surface.set_text(Slot::BoostHint, boost.text());

        let tip = derive_clothing_tip_in(celsius, rain_slots, &self.tz);
        self.surface.set_clothing_tip(&tip.lines());

        self.surface.set_visible(Panel::Details, true);
    }

    pub fn render_hourly(&mut self, forecast: &Forecast) {
        let cards = forecast
            .entries
            .iter()
            .take(HOURLY_CARDS)
            .map(|e| self.card(e, hour_label(&e.time, &self.tz)))
            .collect();

        self.surface.set_hourly_cards(cards);
    }

    pub fn render_daily(&mut self, forecast: &Forecast) {
        let cards = forecast
            .entries
            .iter()
            .filter(|e| e.time_text.contains(MIDDAY_MARKER))
            .take(DAILY_CARDS)
            .map(|e| self.card(e, weekday_label(&e.time, &self.tz).to_string()))
            .collect();

        self.surface.set_daily_cards(cards);
    }

    fn card(&self, entry: &ForecastEntry, label: String) -> ForecastCard {
        ForecastCard {
            label,
            icon_url: format!("{ICON_BASE_URL}/{}.png", entry.icon),
            temperature: format!(
                "{}{}",
                round_half_up(entry.temperature),
                self.state.units.temperature_suffix()
            ),
        }
    }

    pub fn record_recent_city(&mut self, name: &str) {
        let mut list = self.store.load();
        push_recent(&mut list, name);

        if let Err(e) = self.store.save(&list) {
            tracing::warn!("Failed to persist recent cities: {e}");
        }

        self.render_recent_cities();
    }

    pub fn render_recent_cities(&mut self) {
        let list = self.store.load();
        self.surface.set_recent_cities(&list);
        self.surface.set_visible(Panel::RecentCities, !list.is_empty());
    }

    /// Activate the recent-city button at `index`. `None` when there is no
    /// such button; otherwise whether the lookup displayed conditions.
    pub async fn select_recent(&mut self, index: usize) -> Option<bool> {
        let Some(city) = self.store.load().get(index).cloned() else {
            tracing::warn!("No recent city at position {index}");
            return None;
        };

        self.surface.set_text(Slot::Input, &city);
        Some(self.lookup(LocationQuery::PlaceName(city)).await)
    }

    /// Flip the unit system and refresh the cached location in the new unit.
    pub async fn toggle_units(&mut self) -> UnitSystem {
        self.state.units = self.state.units.toggled();

        if let Some(city) = self.state.current.as_ref().map(|c| c.city.clone()) {
            self.lookup(LocationQuery::PlaceName(city)).await;
        }

        self.state.units
    }

    pub fn show_error(&mut self, err: &GatewayError) {
        let message = err.user_message();

        self.surface.set_text(Slot::ErrorMessage, message);
        self.surface.set_visible(Panel::Error, true);
        self.surface.set_visible(Panel::Details, false);
        self.state.last_error = Some(message.to_string());
    }
}
