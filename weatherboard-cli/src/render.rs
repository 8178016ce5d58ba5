//! Terminal rendering surface.

use std::fmt;

use weatherboard_core::{
    BackgroundCategory, ForecastCard, MemorySurface, Panel, RenderSurface, Slot, TipLine,
};

/// Collects dashboard writes and prints them as a text block.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    state: MemorySurface,
    bold: bool,
}

impl TerminalSurface {
    pub fn new(bold: bool) -> Self {
        Self {
            state: MemorySurface::default(),
            bold,
        }
    }

    pub fn print(&self) {
        print!("{self}");
    }

    fn write_details(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.state;
        let text = |slot| s.text(slot).unwrap_or("-");

        writeln!(
            f,
            "{}  {}  {}  {}",
            theme_marker(s.theme),
            self.emphasize(text(Slot::CityName)),
            text(Slot::Temperature),
            text(Slot::Description),
        )?;
        writeln!(
            f,
            "   습도 {} · 풍속 {}",
            text(Slot::Humidity),
            text(Slot::WindSpeed)
        )?;
        writeln!(f, "   {}", text(Slot::Icon))?;
        writeln!(f, "\n🎮 {}", text(Slot::BoostHint))?;

        writeln!(f, "\n👕 옷차림 추천")?;
        for line in &s.tip {
            match line {
                TipLine::Plain(t) => writeln!(f, "   {t}")?,
                TipLine::Emphasis(t) => writeln!(f, "   {}", self.emphasize(t))?,
                TipLine::Blank => writeln!(f)?,
            }
        }

        if !s.hourly.is_empty() {
            writeln!(f, "\n시간별 예보\n   {}", cards_row(&s.hourly))?;
        }
        if !s.daily.is_empty() {
            writeln!(f, "\n5일 예보\n   {}", cards_row(&s.daily))?;
        }
        Ok(())
    }

    fn emphasize(&self, text: &str) -> String {
        if self.bold {
            format!("\x1b[1m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

impl fmt::Display for TerminalSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.state;

        if s.is_visible(Panel::Error) {
            let message = s.text(Slot::ErrorMessage).unwrap_or_default();
            writeln!(f, "⚠ {message}")?;
        }

        if s.is_visible(Panel::Details) {
            self.write_details(f)?;
        }

        if s.is_visible(Panel::RecentCities) {
            let buttons: Vec<String> = s
                .recent
                .iter()
                .enumerate()
                .map(|(i, city)| format!("[{}] {city}", i + 1))
                .collect();
            writeln!(f, "\n최근 검색: {}", buttons.join("  "))?;
        }

        Ok(())
    }
}

fn cards_row(cards: &[ForecastCard]) -> String {
    cards
        .iter()
        .map(|c| format!("{} {}", c.label, c.temperature))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn theme_marker(category: BackgroundCategory) -> &'static str {
    match category {
        BackgroundCategory::Thunder => "⛈",
        BackgroundCategory::Rain => "🌧",
        BackgroundCategory::Snow => "❄",
        BackgroundCategory::Mist => "🌫",
        BackgroundCategory::Clear => "☀",
        BackgroundCategory::Clouds => "☁",
        BackgroundCategory::None => "·",
    }
}

impl RenderSurface for TerminalSurface {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.state.set_text(slot, text);
    }

    fn set_clothing_tip(&mut self, lines: &[TipLine]) {
        self.state.set_clothing_tip(lines);
    }

    fn set_theme(&mut self, category: BackgroundCategory) {
        self.state.set_theme(category);
    }

    fn set_hourly_cards(&mut self, cards: Vec<ForecastCard>) {
        self.state.set_hourly_cards(cards);
    }

    fn set_daily_cards(&mut self, cards: Vec<ForecastCard>) {
        self.state.set_daily_cards(cards);
    }

    fn set_recent_cities(&mut self, cities: &[String]) {
        self.state.set_recent_cities(cities);
    }

    fn set_visible(&mut self, panel: Panel, visible: bool) {
        self.state.set_visible(panel, visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_panel_hides_details() {
        let mut surface = TerminalSurface::new(false);
        surface.set_text(Slot::CityName, "Seoul");
        surface.set_text(Slot::ErrorMessage, "도시를 찾을 수 없습니다.");
        surface.set_visible(Panel::Details, false);
        surface.set_visible(Panel::Error, true);

        let out = surface.to_string();
        assert_eq!(out, "⚠ 도시를 찾을 수 없습니다.\n");
    }

    #[test]
    fn details_include_tip_and_cards() {
        let mut surface = TerminalSurface::new(false);
        surface.set_text(Slot::CityName, "Seoul");
        surface.set_text(Slot::Temperature, "15°C");
        surface.set_theme(BackgroundCategory::Rain);
        surface.set_clothing_tip(&[
            TipLine::Plain("상의: 기모 후드티".into()),
            TipLine::Emphasis("☔ 오늘 비가 오는 시간".into()),
        ]);
        surface.set_hourly_cards(vec![ForecastCard {
            label: "15시".into(),
            icon_url: "https://openweathermap.org/img/wn/10d.png".into(),
            temperature: "14°C".into(),
        }]);
        surface.set_recent_cities(&["Seoul".to_string(), "Busan".to_string()]);
        surface.set_visible(Panel::Details, true);
        surface.set_visible(Panel::RecentCities, true);

        let out = surface.to_string();
        assert!(out.starts_with("🌧  Seoul  15°C  -"));
        assert!(out.contains("   상의: 기모 후드티\n"));
        assert!(out.contains("15시 14°C"));
        assert!(!out.contains("5일 예보"));
        assert!(out.contains("최근 검색: [1] Seoul  [2] Busan"));
    }

    #[test]
    fn bold_wraps_emphasis_in_ansi() {
        let surface = TerminalSurface::new(true);
        assert_eq!(surface.emphasize("비"), "\x1b[1m비\x1b[0m");
    }
}
