//! Core date and time parsing for quickadd.
//!
//! This module provides the keyword/relative date resolver, the time-of-day
//! parser and the general natural language date grammar they fall back to.

mod datetime;
pub mod grammar;

pub use datetime::{parse_date, parse_time, resolve_date, resolve_time};
pub(crate) use datetime::{clock, iso_date};
pub use grammar::{GrammarError, GrammarMatch};
