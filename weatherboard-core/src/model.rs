use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// What the user asked for: a typed place name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    PlaceName(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    /// Build a place-name query from raw input. Returns `None` for blank input.
    pub fn place(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::PlaceName(trimmed.to_string()))
        }
    }

    pub fn coordinates(lat: f64, lon: f64) -> Self {
        Self::Coordinates(Coordinates::new(lat, lon))
    }
}

/// Temperature unit requested from the provider and shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Celsius,
    Fahrenheit,
}

impl UnitSystem {
    /// Value of the provider's `units` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            UnitSystem::Celsius => "metric",
            UnitSystem::Fahrenheit => "imperial",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Celsius => "°C",
            UnitSystem::Fahrenheit => "°F",
        }
    }

    pub fn wind_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Celsius => "m/s",
            UnitSystem::Fahrenheit => "mph",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Celsius => UnitSystem::Fahrenheit,
            UnitSystem::Fahrenheit => UnitSystem::Celsius,
        }
    }

    /// Convert a whole-degree display temperature into whole degrees Celsius.
    pub fn to_celsius(&self, display: i32) -> i32 {
        match self {
            UnitSystem::Celsius => display,
            UnitSystem::Fahrenheit => round_half_up((f64::from(display) - 32.0) * 5.0 / 9.0),
        }
    }
}

/// Round to the nearest whole degree, halves toward positive infinity
/// (`-2.5` becomes `-2`, `2.5` becomes `3`).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UnitSystem::Celsius => "celsius",
            UnitSystem::Fahrenheit => "fahrenheit",
        })
    }
}

/// Current conditions at a location, temperatures in the requested unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub temperature: f64,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub condition_code: i32,
    pub icon: String,
    pub coords: Coordinates,
}

/// One 3-hour forecast interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temperature: f64,
    pub condition_code: i32,
    /// Probability of precipitation, 0.0 to 1.0.
    pub pop: f64,
    pub icon: String,
    /// Provider's `dt_txt`, e.g. `2024-05-01 12:00:00`.
    pub time_text: String,
}

/// Chronological forecast entries; empty when the forecast is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub entries: Vec<ForecastEntry>,
}

impl Forecast {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
