//! Time helpers for request payloads
//!
//! Clients send reservation times as local wall-clock strings; the
//! repositories only ever see `NaiveDateTime`.

use chrono::NaiveDateTime;

use super::{AppError, AppResult};

/// Formats accepted for `start_at`
const START_AT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a reservation start time (`YYYY-MM-DDTHH:MM[:SS]`, `T` or space)
pub fn parse_start_at(value: &str) -> AppResult<NaiveDateTime> {
    let value = value.trim();
    START_AT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| AppError::validation(format!("Invalid start_at: {value}")))
}
