//! quickadd - natural language quick-add parsing
//!
//! This crate turns a single line of task text such as
//! `"Fix auth bug tomorrow 3pm #backend @urgent p1"` into structured task
//! data: title, due date, due time, project, labels, priority and notes.
//!
//! Every parse function takes the reference moment explicitly, so results
//! are reproducible; only the binary reads the clock.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use crate::core::{parse_date, parse_time};
pub use error::QuickAddError;
pub use features::nlp::{
    parse_date_and_time, parse_task_input, parse_task_input_now, ParsedDateTime, ParsedTask,
    Priority,
};
