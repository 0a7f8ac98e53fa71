//! Date and time parsing utilities.
//!
//! Resolves date-only keywords and relative phrases (`today`, `this week`,
//! `in 3 days`) and time-of-day phrases (`3pm`, `at 9:30am`, `15:00`).
//! Anything the hand-written rules don't cover is handed to the general
//! grammar in [`super::grammar`].

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::grammar::{self, end_of_week};

static IN_DAYS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^in\s+(\d+)\s+days?$").unwrap_or_else(|e| panic!("Invalid in-days regex: {e}"))
});

static IN_WEEKS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^in\s+(\d+)\s+weeks?$").unwrap_or_else(|e| panic!("Invalid in-weeks regex: {e}"))
});

static TIME_PREFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:at|by)\s+").unwrap_or_else(|e| panic!("Invalid time prefix regex: {e}"))
});

static CLOCK_24_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})$").unwrap_or_else(|e| panic!("Invalid 24-hour regex: {e}"))
});

static CLOCK_12_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*(am|pm)$")
        .unwrap_or_else(|e| panic!("Invalid 12-hour regex: {e}"))
});

/// Resolve a date phrase relative to `now`.
///
/// Checked in order, first match wins:
/// - `today`, `tomorrow`
/// - `this week` (the Saturday ending the current Sunday-started week)
/// - `next week` (exactly 7 days out)
/// - `in N days`, `in N weeks`
/// - anything the general grammar understands (`next monday`, `jan 15`,
///   `2025-01-20`, ...)
///
/// Returns `None` if the input cannot be resolved.
#[must_use]
pub fn resolve_date(input: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    let today = now.date();
    match normalized.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.checked_add_days(Days::new(1)),
        "this week" => return Some(end_of_week(today)),
        "next week" => return today.checked_add_days(Days::new(7)),
        _ => {},
    }

    if let Some(caps) = IN_DAYS_PATTERN.captures(&normalized) {
        return offset_days(today, &caps[1], 1);
    }

    if let Some(caps) = IN_WEEKS_PATTERN.captures(&normalized) {
        return offset_days(today, &caps[1], 7);
    }

    match grammar::parse(input, now) {
        Ok(matches) => matches
            .iter()
            .find(|m| m.date_stated)
            .or_else(|| matches.first())
            .map(|m| m.date),
        Err(e) => {
            debug!(input, error = %e, "date grammar failed");
            None
        },
    }
}

/// Parse a date phrase into an ISO 8601 date (`YYYY-MM-DD`).
///
/// See [`resolve_date`] for the supported phrases.
#[must_use]
pub fn parse_date(input: &str, now: NaiveDateTime) -> Option<String> {
    resolve_date(input, now).map(iso_date)
}

/// Resolve a time-of-day phrase.
///
/// Supports `15:00`, `9:30am`, `3pm`, the same with an `at`/`by` prefix,
/// and whatever time the general grammar reads (`noon`, `midnight`).
/// A 12-hour time with an hour outside 1-12 is rejected outright.
#[must_use]
pub fn resolve_time(input: &str) -> Option<NaiveTime> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    let cleaned = TIME_PREFIX_PATTERN.replace(&normalized, "");

    if let Some(caps) = CLOCK_24_PATTERN.captures(&cleaned) {
        if let (Ok(hour), Ok(minute)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
            if let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) {
                return Some(time);
            }
        }
    }

    if let Some(caps) = CLOCK_12_PATTERN.captures(&cleaned) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = match caps.get(2) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        return twelve_hour_time(hour, minute, &caps[3]);
    }

    // Only the clock fields are read, so any anchor will do.
    match grammar::parse_first(input, NaiveDateTime::default()) {
        Ok(found) => found.and_then(|m| m.time),
        Err(e) => {
            debug!(input, error = %e, "time grammar failed");
            None
        },
    }
}

/// Parse a time-of-day phrase into 24-hour `HH:MM`.
///
/// See [`resolve_time`] for the supported phrases.
#[must_use]
pub fn parse_time(input: &str) -> Option<String> {
    resolve_time(input).map(clock)
}

/// Convert a 12-hour clock reading to a time of day.
///
/// `12am` is midnight and `12pm` is noon. Hours outside 1-12 or minutes
/// past 59 give `None`.
pub(crate) fn twelve_hour_time(hour: u32, minute: u32, meridiem: &str) -> Option<NaiveTime> {
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }

    let hour = match (meridiem, hour) {
        ("am", 12) => 0,
        ("pm", 12) => 12,
        ("pm", h) => h + 12,
        (_, h) => h,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Format a date as `YYYY-MM-DD`.
pub(crate) fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a time as `HH:MM`.
pub(crate) fn clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn offset_days(today: NaiveDate, amount: &str, unit: u64) -> Option<NaiveDate> {
    let days = amount.parse::<u64>().ok()?.checked_mul(unit)?;
    today.checked_add_days(Days::new(days))
}
