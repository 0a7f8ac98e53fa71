//! General-purpose natural language date grammar.
//!
//! Scans free text for date and time phrases and resolves them against a
//! reference moment:
//! - `today`, `tonight`, `tomorrow`, `yesterday`
//! - `in 3 days`, `2 weeks from now`, `a month ago`
//! - `this week`, `next week`
//! - `friday`, `next monday`, `last tue`, `on thursday`
//! - `jan 15`, `January 20th, 2026`, `15th of march`
//! - `2025-01-20`, `12/15`, `12/15/2025`
//! - `3pm`, `at 9:30am`, `15:00`, `at 9`, `noon`, `tomorrow evening`
//!
//! A date phrase and a time phrase separated only by whitespace, commas,
//! `at` or `on` are merged into a single match. A clock time written next to
//! a day-part word replaces the word's implied hour ("tomorrow evening at
//! 7pm" is 19:00). Every match carries the byte span it was read from, so
//! callers can cut exactly that text out.

use std::ops::Range;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;
use tracing::debug;

use super::datetime::twelve_hour_time;

/// Failure inside the grammar.
///
/// Callers treat these exactly like "no date found".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A numeral in the phrase does not fit the supported range.
    #[error("number out of range in '{0}'")]
    NumberOutOfRange(String),
    /// Date arithmetic for the phrase left the representable calendar.
    #[error("date out of range for '{0}'")]
    DateOutOfRange(String),
}

/// A date (and possibly time) phrase found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarMatch {
    /// Byte range of the phrase in the scanned text.
    pub span: Range<usize>,
    /// The phrase as written.
    pub text: String,
    /// The resolved calendar date.
    pub date: NaiveDate,
    /// Time of day stated or implied by the phrase, if any.
    pub time: Option<NaiveTime>,
    /// False when the phrase is a bare time and `date` is the reference day.
    pub date_stated: bool,
    /// True when `time` was written as a clock reading (`3pm`, `15:00`,
    /// `at 5`) rather than implied by a word like `evening` or `tonight`.
    pub time_stated: bool,
}

/// A time of day and whether it was written as a clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Clock {
    time: NaiveTime,
    stated: bool,
}

impl Clock {
    /// Pick between two readings of the same moment: a stated clock beats an
    /// implied one, otherwise the first wins. Two stated clocks conflict.
    const fn or(self, other: Self) -> Option<Self> {
        match (self.stated, other.stated) {
            (true, true) => None,
            (false, true) => Some(other),
            _ => Some(self),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Date(NaiveDate),
    /// `standalone` is false for words like "morning" that only mean
    /// something when attached to a date.
    Time {
        clock: Clock,
        standalone: bool,
    },
    DateTime(NaiveDate, Clock),
}

#[derive(Debug, Clone)]
struct Fragment {
    span: Range<usize>,
    piece: Piece,
}

/// Fragments found so far, plus phrases that matched but did not resolve.
#[derive(Debug, Default)]
struct Scan {
    fragments: Vec<Fragment>,
    errors: Vec<GrammarError>,
}

impl Scan {
    fn push(&mut self, span: Range<usize>, piece: Result<Piece, GrammarError>) {
        match piece {
            Ok(piece) => self.fragments.push(Fragment { span, piece }),
            Err(e) => self.errors.push(e),
        }
    }

    fn push_time(&mut self, span: Range<usize>, time: NaiveTime, stated: bool, standalone: bool) {
        let clock = Clock { time, stated };
        self.push(span, Ok(Piece::Time { clock, standalone }));
    }
}

const MONTHS: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

const WEEKDAYS: &str = r"monday|mon|tuesday|tues|tue|wednesday|wed|thursday|thurs|thur|thu|friday|fri|saturday|sunday";

static RELATIVE_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(today|tonight|tomorrow|tmrw?|yesterday)\b")
        .unwrap_or_else(|e| panic!("Invalid relative day regex: {e}"))
});

static IN_OFFSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bin\s+(\d+|an?)\s+(day|week|month)s?\b")
        .unwrap_or_else(|e| panic!("Invalid offset regex: {e}"))
});

static FROM_NOW_OFFSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d+|an?)\s+(day|week|month)s?\s+from\s+now\b")
        .unwrap_or_else(|e| panic!("Invalid from-now regex: {e}"))
});

static AGO_OFFSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d+|an?)\s+(day|week|month)s?\s+ago\b")
        .unwrap_or_else(|e| panic!("Invalid ago regex: {e}"))
});

static WEEK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(this|next)\s+week\b").unwrap_or_else(|e| panic!("Invalid week regex: {e}"))
});

static WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:on\s+)?(?:(this|next|last)\s+)?({WEEKDAYS})\b"
    ))
    .unwrap_or_else(|e| panic!("Invalid weekday regex: {e}"))
});

static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    // "jan 15", "january 20th", "dec 15, 2025"
    Regex::new(&format!(
        r"\b(?:on\s+)?({MONTHS})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?(?:,?\s+(\d{{4}}))?\b"
    ))
    .unwrap_or_else(|e| panic!("Invalid month-day regex: {e}"))
});

static DAY_MONTH: Lazy<Regex> = Lazy::new(|| {
    // "15 jan", "15th of march", "3 may 2026"
    Regex::new(&format!(
        r"\b(?:on\s+)?(?:the\s+)?(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({MONTHS})\b(?:,?\s+(\d{{4}})\b)?"
    ))
    .unwrap_or_else(|e| panic!("Invalid day-month regex: {e}"))
});

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b")
        .unwrap_or_else(|e| panic!("Invalid ISO date regex: {e}"))
});

static US_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?\b")
        .unwrap_or_else(|e| panic!("Invalid US date regex: {e}"))
});

static MERIDIEM_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:(?:at|by)\s+)?(\d{1,2})(?::(\d{2}))?\s*(am|pm)\b")
        .unwrap_or_else(|e| panic!("Invalid 12-hour time regex: {e}"))
});

static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:(?:at|by)\s+)?(\d{1,2}):(\d{2})\b")
        .unwrap_or_else(|e| panic!("Invalid 24-hour time regex: {e}"))
});

static AT_HOUR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:at|by)\s+(\d{1,2})\b").unwrap_or_else(|e| panic!("Invalid hour regex: {e}"))
});

static WORD_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(this|in\s+the|at)\s+)?(noon|midday|midnight|morning|afternoon|evening|night)\b",
    )
    .unwrap_or_else(|e| panic!("Invalid time word regex: {e}"))
});

/// Find every date/time phrase in `text`, in text order.
///
/// Phrases that are recognized but cannot be resolved are skipped, so one
/// bad phrase never hides the others.
///
/// # Errors
///
/// Returns a [`GrammarError`] when phrases were recognized but none of them
/// could be resolved (a numeral too large, or arithmetic past the
/// calendar's range).
pub fn parse(text: &str, reference: NaiveDateTime) -> Result<Vec<GrammarMatch>, GrammarError> {
    // ASCII lowercasing keeps byte offsets identical to `text`.
    let lower = text.to_ascii_lowercase();
    let today = reference.date();

    let mut scan = Scan::default();
    scan_relative_days(&lower, today, &mut scan);
    scan_offsets(&lower, today, &mut scan);
    scan_weeks(&lower, today, &mut scan);
    scan_weekdays(&lower, today, &mut scan);
    scan_calendar_dates(&lower, today, &mut scan);
    scan_times(&lower, &mut scan);

    let Scan { fragments, errors } = scan;
    let matches: Vec<GrammarMatch> = merge_adjacent(&lower, select_non_overlapping(fragments))
        .into_iter()
        .filter_map(|fragment| into_match(text, fragment, today))
        .collect();

    let mut errors = errors.into_iter();
    if matches.is_empty() {
        if let Some(e) = errors.next() {
            return Err(e);
        }
    }
    for e in errors {
        debug!(text, error = %e, "skipped unresolvable date phrase");
    }

    Ok(matches)
}

/// Find the earliest date/time phrase in `text`.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_first(
    text: &str,
    reference: NaiveDateTime,
) -> Result<Option<GrammarMatch>, GrammarError> {
    Ok(parse(text, reference)?.into_iter().next())
}

fn whole(caps: &Captures<'_>) -> Range<usize> {
    caps.get(0).map_or(0..0, |m| m.range())
}

fn scan_relative_days(lower: &str, today: NaiveDate, scan: &mut Scan) {
    for caps in RELATIVE_DAY.captures_iter(lower) {
        let phrase = &caps[1];
        let piece = match phrase {
            "today" => Ok(Piece::Date(today)),
            "tonight" => Ok(Piece::DateTime(
                today,
                Clock {
                    time: hm(21, 0),
                    stated: false,
                },
            )),
            "yesterday" => backward(today, 1, phrase).map(Piece::Date),
            _ => forward(today, 1, phrase).map(Piece::Date),
        };
        scan.push(whole(&caps), piece);
    }
}

fn scan_offsets(lower: &str, today: NaiveDate, scan: &mut Scan) {
    let patterns: [(&Regex, bool); 3] = [
        (&*IN_OFFSET, true),
        (&*FROM_NOW_OFFSET, true),
        (&*AGO_OFFSET, false),
    ];

    for (pattern, ahead) in patterns {
        for caps in pattern.captures_iter(lower) {
            let phrase = &caps[0];
            let date = parse_count(&caps[1])
                .and_then(|amount| shift(today, amount, &caps[2], ahead, phrase));
            scan.push(whole(&caps), date.map(Piece::Date));
        }
    }
}

fn scan_weeks(lower: &str, today: NaiveDate, scan: &mut Scan) {
    for caps in WEEK.captures_iter(lower) {
        let date = if &caps[1] == "this" {
            Ok(end_of_week(today))
        } else {
            forward(today, 7, &caps[0])
        };
        scan.push(whole(&caps), date.map(Piece::Date));
    }
}

fn scan_weekdays(lower: &str, today: NaiveDate, scan: &mut Scan) {
    for caps in WEEKDAY.captures_iter(lower) {
        let Some(target) = weekday_from_name(&caps[2]) else {
            continue;
        };
        let modifier = caps.get(1).map(|m| m.as_str());
        let date = resolve_weekday(today, target, modifier, &caps[0]);
        scan.push(whole(&caps), date.map(Piece::Date));
    }
}

/// Resolve a weekday name relative to `today`.
///
/// - bare name: the next occurrence strictly after today
/// - `this`: the next occurrence, today included
/// - `next`: that weekday in the following Sunday-started week
/// - `last`: the most recent occurrence strictly before today
fn resolve_weekday(
    today: NaiveDate,
    target: Weekday,
    modifier: Option<&str>,
    phrase: &str,
) -> Result<NaiveDate, GrammarError> {
    let from = u64::from(today.weekday().num_days_from_sunday());
    let to = u64::from(target.num_days_from_sunday());

    match modifier {
        Some("next") => forward(today, to + 7 - from, phrase),
        Some("last") => {
            let back = (from + 7 - to) % 7;
            backward(today, if back == 0 { 7 } else { back }, phrase)
        },
        Some("this") => forward(today, (to + 7 - from) % 7, phrase),
        _ => {
            let ahead = (to + 7 - from) % 7;
            forward(today, if ahead == 0 { 7 } else { ahead }, phrase)
        },
    }
}

fn scan_calendar_dates(lower: &str, today: NaiveDate, scan: &mut Scan) {
    for caps in MONTH_DAY.captures_iter(lower) {
        let (Some(month), Ok(day)) = (month_from_name(&caps[1]), caps[2].parse::<u32>()) else {
            continue;
        };
        if let Some(date) = calendar_date(today, month, day, caps.get(3).map(|m| m.as_str())) {
            scan.push(whole(&caps), Ok(Piece::Date(date)));
        }
    }

    for caps in DAY_MONTH.captures_iter(lower) {
        let (Ok(day), Some(month)) = (caps[1].parse::<u32>(), month_from_name(&caps[2])) else {
            continue;
        };
        if let Some(date) = calendar_date(today, month, day, caps.get(3).map(|m| m.as_str())) {
            scan.push(whole(&caps), Ok(Piece::Date(date)));
        }
    }

    for caps in ISO_DATE.captures_iter(lower) {
        let (Ok(year), Ok(month), Ok(day)) = (
            caps[1].parse::<i32>(),
            caps[2].parse::<u32>(),
            caps[3].parse::<u32>(),
        ) else {
            continue;
        };
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            scan.push(whole(&caps), Ok(Piece::Date(date)));
        }
    }

    for caps in US_DATE.captures_iter(lower) {
        // "1/2/3" or "4/1/2/3" is a fraction or a path, not a date
        let span = whole(&caps);
        let before = lower.get(..span.start).unwrap_or("");
        let after = lower.get(span.end..).unwrap_or("");
        if before.ends_with('/') || after.starts_with('/') {
            continue;
        }
        let (Ok(month), Ok(day)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
            continue;
        };
        let year = caps.get(3).map(|m| {
            let digits = m.as_str();
            // 2-digit years are 20xx
            if digits.len() == 2 {
                format!("20{digits}")
            } else {
                digits.to_string()
            }
        });
        if let Some(date) = calendar_date(today, month, day, year.as_deref()) {
            scan.push(whole(&caps), Ok(Piece::Date(date)));
        }
    }
}

/// Build a calendar date. Without an explicit year the current year is used,
/// rolled over to next year when the date has already passed.
fn calendar_date(today: NaiveDate, month: u32, day: u32, year: Option<&str>) -> Option<NaiveDate> {
    if let Some(year) = year {
        return NaiveDate::from_ymd_opt(year.parse().ok()?, month, day);
    }

    let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if date < today {
        NaiveDate::from_ymd_opt(today.year() + 1, month, day)
    } else {
        Some(date)
    }
}

fn scan_times(lower: &str, scan: &mut Scan) {
    for caps in MERIDIEM_TIME.captures_iter(lower) {
        let Ok(hour) = caps[1].parse::<u32>() else {
            continue;
        };
        let minute = match caps.get(2).map(|m| m.as_str().parse::<u32>()) {
            Some(Ok(minute)) => minute,
            Some(Err(_)) => continue,
            None => 0,
        };
        if let Some(time) = twelve_hour_time(hour, minute, &caps[3]) {
            scan.push_time(whole(&caps), time, true, true);
        }
    }

    for caps in CLOCK_TIME.captures_iter(lower) {
        let (Ok(hour), Ok(minute)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
            continue;
        };
        if let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) {
            scan.push_time(whole(&caps), time, true, true);
        }
    }

    for caps in AT_HOUR.captures_iter(lower) {
        let Ok(hour) = caps[1].parse::<u32>() else {
            continue;
        };
        if let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) {
            scan.push_time(whole(&caps), time, true, true);
        }
    }

    for caps in WORD_TIME.captures_iter(lower) {
        let word = &caps[2];
        let time = match word {
            "noon" | "midday" => hm(12, 0),
            "midnight" => hm(0, 0),
            "morning" => hm(9, 0),
            "afternoon" => hm(14, 0),
            "evening" => hm(18, 0),
            _ => hm(21, 0),
        };
        let standalone =
            caps.get(1).is_some() || matches!(word, "noon" | "midday" | "midnight");
        scan.push_time(whole(&caps), time, false, standalone);
    }
}

/// Keep the earliest fragment at each position, preferring the longest.
fn select_non_overlapping(mut fragments: Vec<Fragment>) -> Vec<Fragment> {
    fragments.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then_with(|| b.span.end.cmp(&a.span.end))
    });

    let mut selected: Vec<Fragment> = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        if selected
            .last()
            .map_or(true, |last| fragment.span.start >= last.span.end)
        {
            selected.push(fragment);
        }
    }
    selected
}

fn merge_adjacent(lower: &str, fragments: Vec<Fragment>) -> Vec<Fragment> {
    let mut merged: Vec<Fragment> = Vec::with_capacity(fragments.len());

    for fragment in fragments {
        if let Some(last) = merged.last_mut() {
            let gap = lower.get(last.span.end..fragment.span.start).unwrap_or("");
            if is_connector(gap) {
                if let Some(piece) = combine(last.piece, fragment.piece) {
                    last.span.end = fragment.span.end;
                    last.piece = piece;
                    continue;
                }
            }
        }
        merged.push(fragment);
    }

    merged
}

fn is_connector(gap: &str) -> bool {
    gap.split(|c: char| c.is_whitespace() || c == ',')
        .all(|word| word.is_empty() || word == "at" || word == "on")
}

fn combine(first: Piece, second: Piece) -> Option<Piece> {
    match (first, second) {
        (Piece::Date(date), Piece::Time { clock, .. })
        | (Piece::Time { clock, .. }, Piece::Date(date)) => Some(Piece::DateTime(date, clock)),
        (Piece::DateTime(date, held), Piece::Time { clock, .. })
        | (Piece::Time { clock, .. }, Piece::DateTime(date, held)) => {
            Some(Piece::DateTime(date, held.or(clock)?))
        },
        (
            Piece::Time {
                clock: a,
                standalone: a_alone,
            },
            Piece::Time {
                clock: b,
                standalone: b_alone,
            },
        ) => Some(Piece::Time {
            clock: a.or(b)?,
            standalone: a_alone || b_alone,
        }),
        _ => None,
    }
}

fn into_match(text: &str, fragment: Fragment, today: NaiveDate) -> Option<GrammarMatch> {
    let (date, clock, date_stated) = match fragment.piece {
        Piece::Date(date) => (date, None, true),
        Piece::DateTime(date, clock) => (date, Some(clock), true),
        Piece::Time {
            clock,
            standalone: true,
        } => (today, Some(clock), false),
        Piece::Time {
            standalone: false, ..
        } => return None,
    };

    Some(GrammarMatch {
        text: text.get(fragment.span.clone())?.to_string(),
        span: fragment.span,
        date,
        time: clock.map(|c| c.time),
        date_stated,
        time_stated: clock.is_some_and(|c| c.stated),
    })
}

/// The Saturday closing the Sunday-started week that contains `date`.
pub(crate) fn end_of_week(date: NaiveDate) -> NaiveDate {
    let remaining = 6 - u64::from(date.weekday().num_days_from_sunday());
    date.checked_add_days(Days::new(remaining)).unwrap_or(date)
}

fn parse_count(token: &str) -> Result<u64, GrammarError> {
    match token {
        "a" | "an" => Ok(1),
        digits => digits
            .parse()
            .map_err(|_| GrammarError::NumberOutOfRange(digits.to_string())),
    }
}

fn shift(
    today: NaiveDate,
    amount: u64,
    unit: &str,
    ahead: bool,
    phrase: &str,
) -> Result<NaiveDate, GrammarError> {
    match unit {
        "month" => {
            let months = u32::try_from(amount)
                .map(Months::new)
                .map_err(|_| GrammarError::NumberOutOfRange(phrase.to_string()))?;
            let shifted = if ahead {
                today.checked_add_months(months)
            } else {
                today.checked_sub_months(months)
            };
            shifted.ok_or_else(|| GrammarError::DateOutOfRange(phrase.to_string()))
        },
        _ => {
            let days = if unit == "week" {
                amount
                    .checked_mul(7)
                    .ok_or_else(|| GrammarError::NumberOutOfRange(phrase.to_string()))?
            } else {
                amount
            };
            if ahead {
                forward(today, days, phrase)
            } else {
                backward(today, days, phrase)
            }
        },
    }
}

fn forward(date: NaiveDate, days: u64, phrase: &str) -> Result<NaiveDate, GrammarError> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| GrammarError::DateOutOfRange(phrase.to_string()))
}

fn backward(date: NaiveDate, days: u64, phrase: &str) -> Result<NaiveDate, GrammarError> {
    date.checked_sub_days(Days::new(days))
        .ok_or_else(|| GrammarError::DateOutOfRange(phrase.to_string()))
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    match name.get(..3)? {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wednesday, 2025-01-15 12:00.
    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn first(text: &str) -> GrammarMatch {
        parse_first(text, reference()).unwrap().unwrap()
    }

    #[test]
    fn test_relative_days() {
        assert_eq!(first("today").date, ymd(2025, 1, 15));
        assert_eq!(first("tomorrow").date, ymd(2025, 1, 16));
        assert_eq!(first("yesterday").date, ymd(2025, 1, 14));
        assert_eq!(first("tonight").time, NaiveTime::from_hms_opt(21, 0, 0));
    }

    #[test]
    fn test_weekdays() {
        assert_eq!(first("next monday").date, ymd(2025, 1, 20));
        assert_eq!(first("next friday").date, ymd(2025, 1, 24));
        assert_eq!(first("friday").date, ymd(2025, 1, 17));
        assert_eq!(first("wednesday").date, ymd(2025, 1, 22));
        assert_eq!(first("this wednesday").date, ymd(2025, 1, 15));
        assert_eq!(first("last monday").date, ymd(2025, 1, 13));
        assert_eq!(first("on thu").date, ymd(2025, 1, 16));
    }

    #[test]
    fn test_month_day() {
        assert_eq!(first("Jan 15").date, ymd(2025, 1, 15));
        assert_eq!(first("January 20").date, ymd(2025, 1, 20));
        assert_eq!(first("dec 3rd").date, ymd(2025, 12, 3));
        assert_eq!(first("jan 2, 2027").date, ymd(2027, 1, 2));
        assert_eq!(first("15th of march").date, ymd(2025, 3, 15));
    }

    #[test]
    fn test_past_month_day_rolls_to_next_year() {
        assert_eq!(first("jan 10").date, ymd(2026, 1, 10));
    }

    #[test]
    fn test_numeric_dates() {
        assert_eq!(first("2025-01-20").date, ymd(2025, 1, 20));
        assert_eq!(first("12/25").date, ymd(2025, 12, 25));
        assert_eq!(first("2/1/26").date, ymd(2026, 2, 1));
    }

    #[test]
    fn test_offsets() {
        assert_eq!(first("in 3 days").date, ymd(2025, 1, 18));
        assert_eq!(first("in a week").date, ymd(2025, 1, 22));
        assert_eq!(first("in 2 months").date, ymd(2025, 3, 15));
        assert_eq!(first("2 weeks from now").date, ymd(2025, 1, 29));
        assert_eq!(first("3 days ago").date, ymd(2025, 1, 12));
    }

    #[test]
    fn test_weeks() {
        assert_eq!(first("this week").date, ymd(2025, 1, 18));
        assert_eq!(first("next week").date, ymd(2025, 1, 22));
    }

    #[test]
    fn test_date_merges_with_following_time() {
        let found = first("Submit report next Monday 9am please");
        assert_eq!(found.date, ymd(2025, 1, 20));
        assert_eq!(found.time, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(found.text, "next Monday 9am");
    }

    #[test]
    fn test_time_merges_with_following_date() {
        let found = first("call at 5pm on friday");
        assert_eq!(found.date, ymd(2025, 1, 17));
        assert_eq!(found.time, NaiveTime::from_hms_opt(17, 0, 0));
        assert_eq!(found.text, "at 5pm on friday");
    }

    #[test]
    fn test_standalone_time_uses_reference_date() {
        let found = first("lunch at 12:30");
        assert_eq!(found.date, ymd(2025, 1, 15));
        assert_eq!(found.time, NaiveTime::from_hms_opt(12, 30, 0));
        assert_eq!(found.span, 6..14);
    }

    #[test]
    fn test_day_part_needs_a_date() {
        assert!(parse_first("movie night", reference()).unwrap().is_none());
        let found = first("tomorrow evening");
        assert_eq!(found.date, ymd(2025, 1, 16));
        assert_eq!(found.time, NaiveTime::from_hms_opt(18, 0, 0));
        assert_eq!(first("noon").time, NaiveTime::from_hms_opt(12, 0, 0));
    }

    #[test]
    fn test_span_points_into_original_text() {
        let text = "Fix auth bug TOMORROW 3pm";
        let found = first(text);
        assert_eq!(&text[found.span.clone()], "TOMORROW 3pm");
    }

    #[test]
    fn test_no_match_in_plain_text() {
        for text in ["not a date", "invalid date", "Just a simple task", "Mark the sat down"] {
            assert!(parse_first(text, reference()).unwrap().is_none(), "{text}");
        }
    }

    #[test]
    fn test_impossible_dates_are_skipped() {
        assert!(parse_first("feb 30", reference()).unwrap().is_none());
        assert!(parse_first("2025-13-01", reference()).unwrap().is_none());
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(matches!(
            parse("in 99999999999999999999 days", reference()),
            Err(GrammarError::NumberOutOfRange(_))
        ));
        assert!(matches!(
            parse("in 9999999999 weeks", reference()),
            Err(GrammarError::DateOutOfRange(_))
        ));
    }

    #[test]
    fn test_unresolvable_phrase_does_not_hide_others() {
        let found = parse("tomorrow in 99999999999 days", reference()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].date, ymd(2025, 1, 16));
        assert_eq!(found[0].text, "tomorrow");
    }

    #[test]
    fn test_clock_time_overrides_day_part() {
        let found = first("tomorrow evening at 7pm");
        assert_eq!(found.date, ymd(2025, 1, 16));
        assert_eq!(found.time, NaiveTime::from_hms_opt(19, 0, 0));
        assert!(found.time_stated);
        assert_eq!(found.span, 0..23);

        let found = first("tonight at 8pm");
        assert_eq!(found.date, ymd(2025, 1, 15));
        assert_eq!(found.time, NaiveTime::from_hms_opt(20, 0, 0));
        assert!(found.time_stated);
    }

    #[test]
    fn test_implied_time_is_not_stated() {
        let found = first("tomorrow evening");
        assert!(found.date_stated);
        assert!(!found.time_stated);

        let found = first("tonight");
        assert_eq!(found.time, NaiveTime::from_hms_opt(21, 0, 0));
        assert!(!found.time_stated);
    }

    #[test]
    fn test_bare_time_has_no_stated_date() {
        let found = first("3pm");
        assert!(!found.date_stated);
        assert!(found.time_stated);
        assert!(first("friday").date_stated);
    }

    #[test]
    fn test_two_clock_times_stay_apart() {
        let found = parse("3pm 5pm", reference()).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].time, NaiveTime::from_hms_opt(17, 0, 0));
    }

    #[test]
    fn test_slash_chains_are_not_dates() {
        for text in ["1/2/3", "chapter 4/1/2/3", "see 10/20/"] {
            assert!(parse_first(text, reference()).unwrap().is_none(), "{text}");
        }
        assert_eq!(first("due 12/15/2025").date, ymd(2025, 12, 15));
    }

    #[test]
    fn test_multiple_matches_in_order() {
        let found = parse("tomorrow then dec 24", reference()).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].date, ymd(2025, 1, 16));
        assert_eq!(found[1].date, ymd(2025, 12, 24));
    }

    #[test]
    fn test_end_of_week() {
        assert_eq!(end_of_week(ymd(2025, 1, 15)), ymd(2025, 1, 18));
        assert_eq!(end_of_week(ymd(2025, 1, 18)), ymd(2025, 1, 18));
        assert_eq!(end_of_week(ymd(2025, 1, 19)), ymd(2025, 1, 25));
    }
}
