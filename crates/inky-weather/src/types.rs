use serde::Deserialize;

use crate::format::{format_precipitation, parse_timestamp, truncate};
use crate::projection::compass;

/// Label shown for WMO codes missing from the table.
pub const UNKNOWN_LABEL: &str = "?";

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    IcyFog,
    Drizzle,
    LightRain,
    Rain,
    HeavyRain,
    LightSnow,
    Snow,
    HeavySnow,
    Showers,
    Thunder,
}

impl WeatherCondition {
    /// Convert a WMO weather code. Codes outside the table return `None`.
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i64) -> Option<Self> {
        let condition = match code {
            0 | 1 => Self::Clear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 => Self::Fog,
            48 => Self::IcyFog,
            51 | 53 | 55 => Self::Drizzle,
            61 => Self::LightRain,
            63 => Self::Rain,
            65 => Self::HeavyRain,
            71 => Self::LightSnow,
            73 => Self::Snow,
            75 => Self::HeavySnow,
            80..=82 => Self::Showers,
            95 | 96 | 99 => Self::Thunder,
            _ => return None,
        };
        Some(condition)
    }

    /// Short label that fits the left panel
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "P.Cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::IcyFog => "Icy Fog",
            Self::Drizzle => "Drizzle",
            Self::LightRain => "Lt Rain",
            Self::Rain => "Rain",
            Self::HeavyRain => "Hvy Rain",
            Self::LightSnow => "Lt Snow",
            Self::Snow => "Snow",
            Self::HeavySnow => "Hvy Snow",
            Self::Showers => "Showers",
            Self::Thunder => "Thunder",
        }
    }
}

/// Label for a WMO code, `"?"` when unknown
pub fn describe(code: i64) -> &'static str {
    WeatherCondition::from_wmo_code(code).map_or(UNKNOWN_LABEL, |c| c.label())
}

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Result of an IP geolocation lookup
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFix {
    pub coordinates: Coordinates,
    pub city: String,
}

/// Forecast record as returned by the weather service.
/// Index 0 of every daily series is today, index 1 tomorrow.
#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub current_weather: CurrentConditions,
    pub daily: DailySeries,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub weathercode: f64,
    pub winddirection: f64,
    pub windspeed: f64,
    pub time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailySeries {
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub weathercode: Vec<f64>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
}

/// Fully parsed weather for one city slot, ready for the panel
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub city: String,
    pub coordinates: Coordinates,
    pub temp: i32,
    pub desc: &'static str,
    pub wind_dir: &'static str,
    pub wind_speed: i32,
    pub today_high: i32,
    pub today_low: i32,
    pub tomorrow_high: i32,
    pub tomorrow_low: i32,
    pub tomorrow_desc: &'static str,
    pub rain_today: String,
    pub rain_tomorrow: String,
    pub observed: String,
}

impl WeatherSnapshot {
    /// Build a snapshot from a forecast record. Fails if either day is missing.
    pub fn from_forecast(
        city: String,
        coordinates: Coordinates,
        forecast: &Forecast,
    ) -> Result<Self, WeatherError> {
        let current = &forecast.current_weather;
        let daily = &forecast.daily;

        let rain = |i: usize| format_precipitation(daily.precipitation_sum.get(i).copied().flatten());

        Ok(Self {
            city,
            coordinates,
            temp: truncate(current.temperature),
            desc: describe(truncate(current.weathercode).into()),
            wind_dir: compass(current.winddirection),
            wind_speed: truncate(current.windspeed),
            today_high: truncate(day(&daily.temperature_2m_max, "temperature_2m_max", 0)?),
            today_low: truncate(day(&daily.temperature_2m_min, "temperature_2m_min", 0)?),
            tomorrow_high: truncate(day(&daily.temperature_2m_max, "temperature_2m_max", 1)?),
            tomorrow_low: truncate(day(&daily.temperature_2m_min, "temperature_2m_min", 1)?),
            tomorrow_desc: describe(truncate(day(&daily.weathercode, "weathercode", 1)?).into()),
            rain_today: rain(0),
            rain_tomorrow: rain(1),
            observed: parse_timestamp(&current.time),
        })
    }
}

fn day(series: &[f64], name: &str, i: usize) -> Result<f64, WeatherError> {
    series
        .get(i)
        .copied()
        .ok_or_else(|| WeatherError::Data(format!("daily.{} has no entry {}", name, i)))
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Connectivity error: {0}")]
    Connectivity(String),
    #[error("Data error: {0}")]
    Data(String),
    #[error("No city slot {0}")]
    NoSuchSlot(usize),
    #[error("Unknown city: {0}")]
    UnknownCity(String),
}

impl WeatherError {
    /// True for network/socket/timeout failures
    pub fn is_connectivity(&self) -> bool {
        matches!(self, WeatherError::Connectivity(_))
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            WeatherError::Data(e.to_string())
        } else {
            WeatherError::Connectivity(e.to_string())
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        WeatherError::Data(e.to_string())
    }
}
