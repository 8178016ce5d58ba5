//! Rendering surface the dashboard writes into.

use std::collections::HashMap;

use crate::derive::{BackgroundCategory, TipLine};

/// Named text slots on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    CityName,
    Temperature,
    Description,
    Humidity,
    WindSpeed,
    /// Icon image URL.
    Icon,
    BoostHint,
    ErrorMessage,
    /// The search box.
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Details,
    Error,
    RecentCities,
}

/// One hourly or daily forecast card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    /// Hour (`15시`) or weekday (`수`).
    pub label: String,
    pub icon_url: String,
    /// Rounded temperature with unit suffix.
    pub temperature: String,
}

pub trait RenderSurface {
    fn set_text(&mut self, slot: Slot, text: &str);
    fn set_clothing_tip(&mut self, lines: &[TipLine]);
    fn set_theme(&mut self, category: BackgroundCategory);
    fn set_hourly_cards(&mut self, cards: Vec<ForecastCard>);
    fn set_daily_cards(&mut self, cards: Vec<ForecastCard>);
    fn set_recent_cities(&mut self, cities: &[String]);
    fn set_visible(&mut self, panel: Panel, visible: bool);
}

/// Surface that just remembers what was written to it.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    pub texts: HashMap<Slot, String>,
    pub tip: Vec<TipLine>,
    pub theme: BackgroundCategory,
    pub hourly: Vec<ForecastCard>,
    pub daily: Vec<ForecastCard>,
    pub recent: Vec<String>,
    pub visible: HashMap<Panel, bool>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self {
            texts: HashMap::new(),
            tip: Vec::new(),
            theme: BackgroundCategory::None,
            hourly: Vec::new(),
            daily: Vec::new(),
            recent: Vec::new(),
            visible: HashMap::new(),
        }
    }
}

impl MemorySurface {
    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible.get(&panel).copied().unwrap_or(false)
    }
}

impl RenderSurface for MemorySurface {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.texts.insert(slot, text.to_string());
    }

    fn set_clothing_tip(&mut self, lines: &[TipLine]) {
        self.tip = lines.to_vec();
    }

    fn set_theme(&mut self, category: BackgroundCategory) {
        self.theme = category;
    }

    fn set_hourly_cards(&mut self, cards: Vec<ForecastCard>) {
        self.hourly = cards;
    }

    fn set_daily_cards(&mut self, cards: Vec<ForecastCard>) {
        self.daily = cards;
    }

    fn set_recent_cities(&mut self, cities: &[String]) {
        self.recent = cities.to_vec();
    }

    fn set_visible(&mut self, panel: Panel, visible: bool) {
        self.visible.insert(panel, visible);
    }
}
