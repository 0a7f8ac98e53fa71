//! JSON output formatting for quickadd.

use serde::Serialize;

use crate::error::QuickAddError;

/// Generic JSON formatter for any serializable type.
///
/// `None` renders as `null`.
///
/// # Errors
///
/// Returns `QuickAddError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, QuickAddError> {
    Ok(serde_json::to_string_pretty(value)?)
}
