//! Text formatting for panel fields.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Shown when the observation time can't be read.
pub const TIMESTAMP_PLACEHOLDER: &str = "--/-- --:--";

/// Shown when a day has no precipitation figure.
pub const NO_PRECIPITATION: &str = "--";

/// Integer part of a reading; the panel never rounds.
pub fn truncate(value: f64) -> i32 {
    value.trunc() as i32
}

/// `"2026-07-04T13:00"` (seconds optional) → `"4/7 13:00"`.
pub fn parse_timestamp(raw: &str) -> String {
    const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|t| format!("{}/{} {:02}:{:02}", t.day(), t.month(), t.hour(), t.minute()))
        .unwrap_or_else(|| TIMESTAMP_PLACEHOLDER.to_string())
}

/// `Some(0.5)` → `"0.5mm"`, `None` → `"--"`.
pub fn format_precipitation(mm: Option<f64>) -> String {
    match mm {
        // Debug keeps the trailing ".0" on whole amounts
        Some(v) => format!("{:?}mm", v),
        None => NO_PRECIPITATION.to_string(),
    }
}
