//! Combined date and time extraction from mixed text.
//!
//! The grammar reports a time of day for phrases that never stated one
//! ("tomorrow morning", "tonight"). Only clock readings (`3pm`, `9:30am`,
//! `at 5`, `15:00`) are kept here. A clock written apart from the date, before
//! or after it, is paired with the first stated date.

use std::ops::Range;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{clock, grammar, iso_date, resolve_date, resolve_time};

/// Date and time read from a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDateTime {
    /// ISO 8601 date (`YYYY-MM-DD`).
    pub date: Option<String>,
    /// 24-hour time (`HH:MM`), only when the text stated one.
    pub time: Option<String>,
    /// The input the result was read from, trimmed.
    pub raw: String,
}

impl ParsedDateTime {
    fn new(date: NaiveDate, time: Option<NaiveTime>, raw: &str) -> Self {
        Self {
            date: Some(iso_date(date)),
            time: time.map(clock),
            raw: raw.to_string(),
        }
    }
}

/// A [`ParsedDateTime`] plus the byte ranges of the input it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeMatch {
    pub parsed: ParsedDateTime,
    /// Spans of the date phrase and, when found separately, the time phrase.
    pub spans: Vec<Range<usize>>,
}

static TIME_PHRASE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:at|by)\s+)?\d{1,2}(?::\d{2})?\s*(?:am|pm)\b|\b(?:(?:at|by)\s+)?\d{1,2}:\d{2}\b",
    )
    .unwrap_or_else(|e| panic!("Invalid time phrase regex: {e}"))
});

/// Parse a string containing a date and optionally a time.
///
/// Returns `None` when no date could be found at all.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use quickadd::features::nlp::parse_date_and_time;
///
/// let now = NaiveDate::from_ymd_opt(2025, 1, 15)
///     .and_then(|d| d.and_hms_opt(12, 0, 0))
///     .unwrap();
///
/// let parsed = parse_date_and_time("tomorrow 3pm", now).unwrap();
/// assert_eq!(parsed.date.as_deref(), Some("2025-01-16"));
/// assert_eq!(parsed.time.as_deref(), Some("15:00"));
///
/// let parsed = parse_date_and_time("tomorrow", now).unwrap();
/// assert_eq!(parsed.time, None);
/// ```
#[must_use]
pub fn parse_date_and_time(input: &str, now: NaiveDateTime) -> Option<ParsedDateTime> {
    locate_date_and_time(input, now).map(|found| found.parsed)
}

/// Like [`parse_date_and_time`], also reporting which spans of `input` were
/// consumed.
#[must_use]
pub fn locate_date_and_time(input: &str, now: NaiveDateTime) -> Option<DateTimeMatch> {
    let raw = input.trim();
    if raw.is_empty() {
        return None;
    }

    match grammar::parse(input, now) {
        Ok(matches) if !matches.is_empty() => {
            let found = matches
                .iter()
                .find(|m| m.date_stated)
                .or_else(|| matches.first())?;

            let mut spans = vec![found.span.clone()];
            let mut time = found.time.filter(|_| found.time_stated);

            if time.is_none() {
                if let Some(clock) = matches
                    .iter()
                    .find(|m| !m.date_stated && m.time_stated)
                {
                    time = clock.time;
                    spans.push(clock.span.clone());
                }
            }

            let time = time.or_else(|| find_time_phrase(input, &mut spans));
            trace!(input, ?spans, "date/time located by grammar");

            return Some(DateTimeMatch {
                parsed: ParsedDateTime::new(found.date, time, raw),
                spans,
            });
        },
        Ok(_) => {},
        Err(e) => debug!(input, error = %e, "date grammar failed, trying keywords"),
    }

    let date = resolve_date(raw, now)?;
    let start = input.len() - input.trim_start().len();
    let mut spans = vec![start..start + raw.len()];
    let time = find_time_phrase(input, &mut spans);
    trace!(input, ?spans, "date/time located by keywords");

    Some(DateTimeMatch {
        parsed: ParsedDateTime::new(date, time, raw),
        spans,
    })
}

/// Look for a standalone time phrase and record its span when it parses.
fn find_time_phrase(input: &str, spans: &mut Vec<Range<usize>>) -> Option<NaiveTime> {
    let phrase = TIME_PHRASE_PATTERN.find(input)?;
    let time = resolve_time(phrase.as_str())?;
    spans.push(phrase.range());
    Some(time)
}
