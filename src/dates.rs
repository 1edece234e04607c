// src/dates.rs
//
// Date projection for the "next meeting" field: take the scraped meeting
// date ("Tuesday 2nd September 2025"), jump exactly seven days, and
// re-render in the same long-form English style.

use std::sync::OnceLock;

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("could not parse meeting date '{input}'")]
pub struct DateParseError {
    pub input: String,
    #[source]
    source: chrono::ParseError,
}

/// Ordinal suffix for a day of month: 11-13 are always "th",
/// otherwise the last digit decides.
pub fn day_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Drop the ordinal suffix directly after the day number, first match
/// only. Matching the bare literals anywhere would chew up weekday and
/// month names ("August", "Saturday"), so the digits anchor it.
fn strip_ordinal(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(\d{1,2})(?:st|nd|rd|th)").unwrap());
    re.replace(s, "$1").into_owned()
}

/// "<Weekday> <day><suffix> <Month> <Year>" → same shape, 7 days later.
pub fn next_week(date_str: &str) -> Result<String, DateParseError> {
    let cleaned = strip_ordinal(date_str);
    let parsed = NaiveDate::parse_from_str(cleaned.trim(), "%A %d %B %Y")
        .map_err(|source| DateParseError { input: String::from(date_str), source })?;

    // Adding 7 days cannot overflow for any date the page can carry.
    let next = parsed.checked_add_days(Days::new(7)).unwrap_or(parsed);
    let day = next.day();
    Ok(format!(
        "{} {}{} {}",
        next.format("%A"),
        day,
        day_suffix(day),
        next.format("%B %Y")
    ))
}
