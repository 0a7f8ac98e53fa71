//! Command implementations for quickadd.
//!
//! Every command returns the text to print; nothing is written to stdout here.

use std::path::Path;

use chrono::NaiveDateTime;
use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, ConfigCommands, OutputFormat};
use crate::config::Config;
use crate::core::{parse_date, parse_time};
use crate::error::QuickAddError;
use crate::features::nlp::{parse_date_and_time, parse_task_input};
use crate::output::{format_datetime, format_task, format_value};

/// Execute the parse command.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn parse(text: &str, now: NaiveDateTime, format: OutputFormat) -> Result<String, QuickAddError> {
    let task = parse_task_input(text, now);
    format_task(&task, format)
}

/// Execute the date command.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn date(text: &str, now: NaiveDateTime, format: OutputFormat) -> Result<String, QuickAddError> {
    format_value(parse_date(text, now).as_deref(), "date", format)
}

/// Execute the time command.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn time(text: &str, format: OutputFormat) -> Result<String, QuickAddError> {
    format_value(parse_time(text).as_deref(), "time", format)
}

/// Execute the datetime command.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn datetime(
    text: &str,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, QuickAddError> {
    format_datetime(parse_date_and_time(text, now).as_ref(), format)
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be written, or already exists
/// and `--force` was not given.
pub fn config(
    cmd: &ConfigCommands,
    config: &Config,
    path: &Path,
) -> Result<String, QuickAddError> {
    match cmd {
        ConfigCommands::Show => config.to_yaml(),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                return Err(QuickAddError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            Config::default().save_to_path(path)?;
            Ok(format!("Wrote {}", path.display()))
        },
    }
}

/// Generate shell completions for the specified shell.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, QuickAddError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "quickadd", &mut buf);
    String::from_utf8(buf)
        .map_err(|e| QuickAddError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
