use std::fmt::Display;

use chrono::{DateTime, Local};
use chrono_english::parse_date_string;
use clap::ValueEnum;
use tracing::debug;

use crate::utils::time::{date_to_record_name, parse_record_date};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Turns whatever the user typed ("yesterday", "15/03/2025", "2025-03-15") into `YYYY-MM-DD`.
/// Input that can't be understood is passed through untouched, the trackers report it.
pub fn normalize_date(input: &str, now: DateTime<Local>, style: DateStyle) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() || parse_record_date(trimmed).is_some() {
        return trimmed.to_string();
    }
    match parse_date_string(trimmed, now, style.into()) {
        Ok(v) => date_to_record_name(v.date_naive()),
        Err(e) => {
            debug!("Couldn't read {trimmed:?} as a date: {e}");
            trimmed.to_string()
        }
    }
}
