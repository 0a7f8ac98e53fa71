//! Command-line interface for quickadd.

pub mod args;
pub mod commands;
