use chrono::{Duration, NaiveDate};

pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// This is the standard way of converting a date to a string in growthkit.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format(RECORD_DATE_FORMAT).to_string()
}

/// Parses a date written the way [date_to_record_name] writes it. Surrounding whitespace is
/// ignored.
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), RECORD_DATE_FORMAT).ok()
}

/// Renders a duration as `HH:MM:SS`. Negative durations render as zero, hours are not wrapped.
pub fn format_clock(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
