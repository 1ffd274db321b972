//! Conversions from raw form input into typed values. Everything here trims its input first.

use chrono::NaiveDate;

use crate::{
    error::{TrackerError, TrackerResult},
    utils::time::parse_record_date,
};

/// Non-blank text, trimmed.
pub fn required_text<'a>(field: &'static str, value: &'a str) -> TrackerResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TrackerError::missing(field));
    }
    Ok(value)
}

/// A finite number that is at least 0.
pub fn parse_non_negative(field: &'static str, value: &str) -> TrackerResult<f64> {
    let raw = value.trim();
    let number = raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TrackerError::InvalidNumber {
            field,
            value: raw.to_string(),
        })?;
    if number < 0. {
        return Err(TrackerError::out_of_range(field, format!("{number} is negative")));
    }
    Ok(number)
}

/// A whole number. Range checks are left to the caller.
pub fn parse_integer(field: &'static str, value: &str) -> TrackerResult<i64> {
    let raw = value.trim();
    raw.parse::<i64>().map_err(|_| TrackerError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

pub fn parse_date(value: &str) -> TrackerResult<NaiveDate> {
    parse_record_date(value).ok_or_else(|| TrackerError::InvalidDate {
        value: value.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::error::TrackerError;

    use super::{parse_date, parse_integer, parse_non_negative, required_text};

    #[test]
    fn required_text_trims() {
        assert_eq!(required_text("name", "  run ").unwrap(), "run");
        assert!(matches!(
            required_text("name", "   "),
            Err(TrackerError::MissingField { field: "name" })
        ));
    }

    #[test]
    fn non_negative_numbers() {
        assert_eq!(parse_non_negative("duration", "30").unwrap(), 30.);
        assert_eq!(parse_non_negative("duration", " 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_non_negative("duration", "0").unwrap(), 0.);
        assert!(matches!(
            parse_non_negative("duration", "abc"),
            Err(TrackerError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_non_negative("duration", "inf"),
            Err(TrackerError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_non_negative("duration", "-1"),
            Err(TrackerError::OutOfRange { .. })
        ));
    }

    #[test]
    fn integers() {
        assert_eq!(parse_integer("percent", "42").unwrap(), 42);
        assert!(matches!(
            parse_integer("percent", "4.2"),
            Err(TrackerError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn dates() {
        assert!(parse_date("2025-01-31").is_ok());
        assert!(matches!(
            parse_date("2025-13-01"),
            Err(TrackerError::InvalidDate { .. })
        ));
    }
}
