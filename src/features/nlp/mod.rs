//! Natural language parsing for task entry.
//!
//! This module provides parsing for natural language task input like:
//! - "buy milk tomorrow 3pm #errands"
//! - "call mom next friday at 6pm @family p2"
//! - "finish report jan 20 #work @urgent // draft is in the shared drive"

mod datetime;
mod parser;
pub mod tokens;

pub use datetime::{locate_date_and_time, parse_date_and_time, DateTimeMatch, ParsedDateTime};
pub use parser::{parse_task_input, parse_task_input_now, InvalidPriority, ParsedTask, Priority};
