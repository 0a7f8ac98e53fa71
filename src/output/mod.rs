//! Output formatting for quickadd.
//!
//! This module renders parse results as colored text or JSON.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::QuickAddError;
use crate::features::nlp::{ParsedDateTime, ParsedTask};

pub use json::*;
pub use pretty::*;

/// Format a parsed task based on output format
///
/// # Errors
///
/// Returns `QuickAddError::Parse` if JSON serialization fails.
pub fn format_task(task: &ParsedTask, format: OutputFormat) -> Result<String, QuickAddError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format a combined date/time result based on output format
///
/// # Errors
///
/// Returns `QuickAddError::Parse` if JSON serialization fails.
pub fn format_datetime(
    parsed: Option<&ParsedDateTime>,
    format: OutputFormat,
) -> Result<String, QuickAddError> {
    match format {
        OutputFormat::Pretty => Ok(format_datetime_pretty(parsed)),
        OutputFormat::Json => to_json(&parsed),
    }
}

/// Format a single date or time value based on output format
///
/// `what` names the value in the pretty "not found" notice.
///
/// # Errors
///
/// Returns `QuickAddError::Parse` if JSON serialization fails.
pub fn format_value(
    value: Option<&str>,
    what: &str,
    format: OutputFormat,
) -> Result<String, QuickAddError> {
    match format {
        OutputFormat::Pretty => Ok(format_value_pretty(value, what)),
        OutputFormat::Json => to_json(&value),
    }
}
