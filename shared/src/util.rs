use chrono::{Datelike, NaiveDateTime};

/// English ordinal suffix for a day of month (1st, 2nd, 3rd, 4th, 11th, 21st ...)
pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Render a reservation time for display: "April 1st 2024, 7:30 pm"
pub fn format_start_at(start_at: &NaiveDateTime) -> String {
    let day = start_at.day();
    format!(
        "{} {}{} {}",
        start_at.format("%B"),
        day,
        ordinal_suffix(day),
        start_at.format("%Y, %-I:%M %P"),
    )
}
