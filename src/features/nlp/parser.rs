//! Natural language task parser.
//!
//! Parses strings like "Fix auth bug tomorrow 3pm #backend @urgent p1"
//! into structured task data.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use super::datetime::locate_date_and_time;
use super::tokens::{self, Claims, TokenKind};

/// Priority levels for tasks, `P1` being the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    P1,
    P2,
    P3,
    P4,
}

/// A priority number outside 1-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("priority must be between 1 and 4, got {0}")]
pub struct InvalidPriority(pub u8);

impl Priority {
    /// The numeric level, 1 through 4.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::P1 => 1,
            Self::P2 => 2,
            Self::P3 => 3,
            Self::P4 => 4,
        }
    }

    /// Short label, e.g. `P1`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P4 => "P4",
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.level()
    }
}

impl TryFrom<u8> for Priority {
    type Error = InvalidPriority;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Self::P1),
            2 => Ok(Self::P2),
            3 => Ok(Self::P3),
            4 => Ok(Self::P4),
            other => Err(InvalidPriority(other)),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of parsing a natural language task string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTask {
    /// The task title (main text after extracting all patterns).
    pub title: String,
    /// Due date as `YYYY-MM-DD`.
    pub due_date: Option<String>,
    /// Due time as `HH:MM`, only when a time was written.
    pub due_time: Option<String>,
    /// Project name from the first `#project` token.
    pub project_name: Option<String>,
    /// Labels from `@label` tokens, in order of appearance.
    pub label_names: Vec<String>,
    /// Priority from the first `p1`..`p4` token.
    pub priority: Option<Priority>,
    /// Optional notes (text after //).
    pub notes: Option<String>,
}

impl ParsedTask {
    /// Check if anything besides the title was detected.
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        self.due_date.is_some()
            || self.project_name.is_some()
            || !self.label_names.is_empty()
            || self.priority.is_some()
            || self.notes.is_some()
    }

    /// Check if this is the all-default result of empty input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && !self.has_metadata() && self.due_time.is_none()
    }
}

/// Parse a natural language task string into structured data.
///
/// Supported patterns:
/// - Priority: `p1`..`p4` (any case)
/// - Project: `#project-name`
/// - Labels: `@label` (any number)
/// - Dates: `tomorrow`, `next monday`, `jan 15`, `in 3 days`, `2025-01-20`
/// - Times: `3pm`, `9:30am`, `15:00`, `at 2pm`, `by 5pm`
/// - Notes: `// note text` at the end
///
/// Relative dates resolve against `now`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use quickadd::features::nlp::{parse_task_input, Priority};
///
/// let now = NaiveDate::from_ymd_opt(2025, 1, 15)
///     .and_then(|d| d.and_hms_opt(12, 0, 0))
///     .unwrap();
///
/// let task = parse_task_input("Fix auth bug tomorrow 3pm #backend @urgent p1", now);
/// assert_eq!(task.title, "Fix auth bug");
/// assert_eq!(task.due_date.as_deref(), Some("2025-01-16"));
/// assert_eq!(task.due_time.as_deref(), Some("15:00"));
/// assert_eq!(task.project_name.as_deref(), Some("backend"));
/// assert_eq!(task.label_names, vec!["urgent"]);
/// assert_eq!(task.priority, Some(Priority::P1));
/// ```
#[must_use]
pub fn parse_task_input(input: &str, now: NaiveDateTime) -> ParsedTask {
    let text = input.trim();
    if text.is_empty() {
        return ParsedTask::default();
    }

    let mut task = ParsedTask::default();
    let mut claims = Claims::default();

    // Notes go first so nothing inside a note is read as metadata
    if let Some(note) = claims.claim_first(tokens::notes(text)) {
        task.notes = Some(note.value);
    }

    if let Some(token) = claims.claim_first(tokens::priorities(text)) {
        task.priority = token
            .value
            .parse::<u8>()
            .ok()
            .and_then(|level| Priority::try_from(level).ok());
    }

    if let Some(token) = claims.claim_first(tokens::projects(text)) {
        task.project_name = Some(token.value);
    }

    task.label_names = claims
        .claim_all(tokens::labels(text))
        .into_iter()
        .map(|token| token.value)
        .collect();

    if let Some(found) = locate_date_and_time(&claims.masked(text), now) {
        task.due_date = found.parsed.date;
        task.due_time = found.parsed.time;
        for span in found.spans {
            claims.claim_span(TokenKind::DateTime, span);
        }
    }

    trace!(input = text, ?claims, "task input claims");
    task.title = clean_title(&claims.unclaimed(text));

    task
}

/// [`parse_task_input`] against the local clock.
#[must_use]
pub fn parse_task_input_now(input: &str) -> ParsedTask {
    parse_task_input(input, Local::now().naive_local())
}

/// Clean up the title by collapsing whitespace.
fn clean_title(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
