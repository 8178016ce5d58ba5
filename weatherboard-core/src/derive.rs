//! Pure derivations from normalized weather data.
//!
//! Nothing here performs I/O; every function is a plain mapping from
//! provider values to presentation artifacts.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::model::ForecastEntry;

/// Condition codes in this band are rain (upper bound exclusive).
const RAIN_BAND: std::ops::Range<i32> = 500..600;
const RAIN_POP_THRESHOLD: f64 = 0.3;
const STRONG_WIND: f64 = 10.0;

/// Select today's rain-bearing entries.
///
/// "Today" compares the local day-of-month only, so entries from the same
/// day-of-month in another month would match and a slot just after
/// midnight counts as tomorrow.
pub fn select_rain_slots<Tz: TimeZone>(
    entries: &[ForecastEntry],
    now: &DateTime<Tz>,
) -> Vec<ForecastEntry> {
    let tz = now.timezone();
    let today = now.day();

    entries
        .iter()
        .filter(|e| e.time.with_timezone(&tz).day() == today)
        .filter(|e| RAIN_BAND.contains(&e.condition_code) || e.pop >= RAIN_POP_THRESHOLD)
        .cloned()
        .collect()
}

/// Clothing recommendation for a temperature, plus rain hours when any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClothingTip {
    pub outer: Option<&'static str>,
    pub inner: Option<&'static str>,
    pub rain_hours: Vec<u32>,
    pub umbrella: bool,
}

/// One line of rendered tip text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipLine {
    Plain(String),
    Emphasis(String),
    Blank,
}

// (minimum Celsius, outer, inner), first match wins.
const CLOTHING_TIERS: &[(i32, Option<&str>, &str)] = &[
    (28, None, "민소매, 반팔 티셔츠"),
    (23, None, "반팔, 얇은 셔츠"),
    (20, Some("얇은 가디건"), "긴팔 티셔츠"),
    (17, Some("얇은 재킷"), "맨투맨"),
    (12, Some("가디건, 야상"), "기모 후드티"),
    (9, Some("트렌치 코트"), "두꺼운 상의"),
    (5, Some("울 코트"), "히트텍"),
];
const COLDEST_TIER: (Option<&str>, &str) = (Some("패딩"), "방한용품 필수");

/// Clothing tip with rain hours taken in the machine's local time zone.
pub fn derive_clothing_tip(celsius: i32, rain_slots: &[ForecastEntry]) -> ClothingTip {
    derive_clothing_tip_in(celsius, rain_slots, &Local)
}

pub fn derive_clothing_tip_in<Tz: TimeZone>(
    celsius: i32,
    rain_slots: &[ForecastEntry],
    tz: &Tz,
) -> ClothingTip {
    let (outer, inner) = CLOTHING_TIERS
        .iter()
        .find(|(min, _, _)| celsius >= *min)
        .map(|(_, outer, inner)| (*outer, *inner))
        .unwrap_or(COLDEST_TIER);

    let rain_hours: Vec<u32> = rain_slots
        .iter()
        .map(|slot| slot.time.with_timezone(tz).hour())
        .collect();

    ClothingTip {
        outer,
        inner: Some(inner),
        umbrella: !rain_hours.is_empty(),
        rain_hours,
    }
}

impl ClothingTip {
    pub fn lines(&self) -> Vec<TipLine> {
        let mut lines = Vec::new();

        if let Some(outer) = self.outer {
            lines.push(TipLine::Plain(format!("아우터: {outer}")));
        }
        if let Some(inner) = self.inner {
            lines.push(TipLine::Plain(format!("상의: {inner}")));
        }

        if !self.rain_hours.is_empty() {
            lines.push(TipLine::Blank);
            lines.push(TipLine::Emphasis("☔ 오늘 비가 오는 시간".to_string()));
            lines.extend(
                self.rain_hours
                    .iter()
                    .map(|h| TipLine::Plain(format!("• {h}시 비 예보"))),
            );
        }
        if self.umbrella {
            lines.push(TipLine::Plain("우산을 챙기세요!".to_string()));
        }

        lines
    }
}

/// Which gameplay types the current weather favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostHint {
    Windy,
    Rain,
    Snow,
    Fog,
    Clear,
    PartlyCloudy,
    Cloudy,
    Unavailable,
    /// Produced only by [`BoostTable::Legacy`], which keeps its own wording.
    Legacy(LegacyBoost),
}

impl BoostHint {
    pub fn text(&self) -> &'static str {
        match self {
            BoostHint::Windy => "🌬 강풍 — 비행 / 드래곤 / 에스퍼 타입 부스트",
            BoostHint::Rain => "🌧 비 — 물 / 벌레 / 전기 타입 부스트",
            BoostHint::Snow => "❄ 눈 — 얼음 / 강철 타입 부스트",
            BoostHint::Fog => "🌫 안개 — 고스트 / 악 타입 부스트",
            BoostHint::Clear => "☀️ 맑음 — 땅 / 풀 / 불꽃 타입 부스트",
            BoostHint::PartlyCloudy => "🌤 약간구름 — 바위 / 노멀 타입 부스트",
            BoostHint::Cloudy => "☁ 구름 — 격투 / 독 / 페어리 타입 부스트",
            BoostHint::Unavailable => "부스트 정보를 확인할 수 없습니다.",
            BoostHint::Legacy(hint) => hint.text(),
        }
    }
}

/// Categories of the coarse id-range table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegacyBoost {
    Thunder,
    Rain,
    Snow,
    Fog,
    Clear,
    /// Code 804 only.
    Overcast,
    /// Every other code above 800.
    Cloudy,
    Unclear,
}

impl LegacyBoost {
    pub fn from_code(condition_code: i32) -> Self {
        match condition_code {
            200..=299 => Self::Thunder,
            300..=599 => Self::Rain,
            600..=699 => Self::Snow,
            700..=799 => Self::Fog,
            800 => Self::Clear,
            804 => Self::Overcast,
            c if c > 800 => Self::Cloudy,
            _ => Self::Unclear,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::Thunder => "⚡️ 비/바람: 전기, 물, 벌레 타입 부스트",
            Self::Rain => "🌧 비: 물, 전기, 벌레 타입 부스트",
            Self::Snow => "❄️ 눈: 얼음, 강철 타입 부스트",
            Self::Fog => "🌫 안개: 악, 고스트 타입 부스트",
            Self::Clear => "☀️ 맑음: 풀, 땅, 불 타입 부스트",
            Self::Overcast => "☁️ 구름 많음: 페어리, 격투 타입 부스트",
            Self::Cloudy => "☁️ 흐림: 페어리, 격투 타입 부스트",
            Self::Unclear => "날씨 정보가 명확하지 않아 부스트를 확인할 수 없습니다.",
        }
    }
}

/// Selectable boost classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoostTable {
    /// Wind overrides everything; clouds split into light and heavy.
    #[default]
    WindAware,
    /// Coarse condition-code ranges, wind ignored.
    Legacy,
}

impl BoostTable {
    pub fn classify(&self, condition_code: i32, wind_speed: f64) -> BoostHint {
        match self {
            BoostTable::WindAware => derive_boost_hint(condition_code, wind_speed),
            BoostTable::Legacy => BoostHint::Legacy(LegacyBoost::from_code(condition_code)),
        }
    }
}

pub fn derive_boost_hint(condition_code: i32, wind_speed: f64) -> BoostHint {
    if wind_speed >= STRONG_WIND {
        return BoostHint::Windy;
    }

    match condition_code {
        300..=599 => BoostHint::Rain,
        600..=699 => BoostHint::Snow,
        741 | 700..=799 => BoostHint::Fog,
        800 => BoostHint::Clear,
        801 => BoostHint::PartlyCloudy,
        802..=804 => BoostHint::Cloudy,
        _ => BoostHint::Unavailable,
    }
}

/// Visual theme for the current condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackgroundCategory {
    Thunder,
    Rain,
    Snow,
    Mist,
    Clear,
    Clouds,
    None,
}

impl BackgroundCategory {
    pub fn from_code(condition_code: i32) -> Self {
        match condition_code {
            200..=299 => Self::Thunder,
            300..=599 => Self::Rain,
            600..=699 => Self::Snow,
            700..=799 => Self::Mist,
            800 => Self::Clear,
            c if c > 800 => Self::Clouds,
            _ => Self::None,
        }
    }
}

/// Rewrite the two haze descriptions into plainer wording.
pub fn normalize_description(description: &str) -> &str {
    match description {
        "연무" => "뿌연 공기",
        "박무" => "옅은 안개",
        other => other,
    }
}

pub fn hour_label<Tz: TimeZone>(time: &DateTime<Utc>, tz: &Tz) -> String {
    format!("{}시", time.with_timezone(tz).hour())
}

pub fn weekday_label<Tz: TimeZone>(time: &DateTime<Utc>, tz: &Tz) -> &'static str {
    match time.with_timezone(tz).weekday() {
        Weekday::Mon => "월",
        Weekday::Tue => "화",
        Weekday::Wed => "수",
        Weekday::Thu => "목",
        Weekday::Fri => "금",
        Weekday::Sat => "토",
        Weekday::Sun => "일",
    }
}
