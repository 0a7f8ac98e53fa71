use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::QuickAddError;

#[derive(Parser)]
#[command(name = "quickadd")]
#[command(about = "Parse natural language task entries into structured task data")]
#[command(long_about = "quickadd - natural language quick-add parser

Turns a single line like \"Fix auth bug tomorrow 3pm #backend @urgent p1\"
into a title, due date, due time, project, labels, priority and notes.

QUICK START:
  quickadd parse \"Call client Jan 20 at 2pm @sales\"
  quickadd date \"next monday\"
  quickadd time \"9:30am\"
  quickadd datetime \"in 3 days at 5:30pm\"

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  quickadd <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file, or
    /// 'pretty' when unset.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Reference moment for relative dates (default: now)
    ///
    /// Accepts `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]` or a bare
    /// `YYYY-MM-DD` (midnight).
    #[arg(long, global = true, value_name = "DATETIME")]
    pub now: Option<String>,

    /// Path to the config file (default: ~/.quickadd/config.yaml)
    #[arg(long, global = true, env = "QUICKADD_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The moment relative phrases resolve against.
    ///
    /// # Errors
    ///
    /// Returns `QuickAddError::InvalidArgument` if `--now` is malformed.
    pub fn reference_time(&self) -> Result<NaiveDateTime, QuickAddError> {
        match &self.now {
            Some(value) => parse_reference_time(value),
            None => Ok(Local::now().naive_local()),
        }
    }
}

fn parse_reference_time(value: &str) -> Result<NaiveDateTime, QuickAddError> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    let value = value.trim();

    if let Some(moment) = FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Ok(moment);
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            QuickAddError::InvalidArgument(format!(
                "--now expects YYYY-MM-DDTHH:MM[:SS], got '{value}'"
            ))
        })
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a task entry into its fields
    ///
    /// Extracts the title plus any due date, due time, project, labels,
    /// priority and notes. Nothing is stored.
    ///
    /// # Examples
    ///
    ///   quickadd parse "Fix auth bug tomorrow 3pm #backend @urgent p1"
    ///   quickadd p "Review PR p2 @code-review #frontend"
    ///   quickadd parse "Deploy #infra // check the runbook first"
    ///
    /// # Supported Patterns
    ///
    ///   Dates:      today, tomorrow, next monday, jan 20, in 3 days, 2025-01-20
    ///   Times:      3pm, 9:30am, 15:00, at 2pm, by 5pm
    ///   Project:    #project-name (first one wins)
    ///   Labels:     @label (any number)
    ///   Priority:   p1, p2, p3, p4
    ///   Notes:      // notes at the end
    #[command(alias = "p")]
    Parse(TextArgs),

    /// Resolve a date phrase to YYYY-MM-DD
    ///
    ///   quickadd date tomorrow
    ///   quickadd date "in 2 weeks"
    Date(TextArgs),

    /// Resolve a time phrase to 24-hour HH:MM
    ///
    ///   quickadd time 3pm
    ///   quickadd time "at 9:30am"
    Time(TextArgs),

    /// Read a date and an optional explicit time from mixed text
    ///
    ///   quickadd datetime "next Monday at 9am"
    ///   quickadd datetime "tomorrow morning"
    Datetime(TextArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Example: quickadd completions bash > ~/.bash_completion.d/quickadd
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Free text taken from the remaining arguments.
#[derive(Args)]
pub struct TextArgs {
    /// Text to parse; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl TextArgs {
    /// The words joined back into one line.
    #[must_use]
    pub fn joined(&self) -> String {
        self.text.join(" ")
    }
}

/// Arguments for config management.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as YAML
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_words_are_joined() {
        let cli = Cli::parse_from(["quickadd", "parse", "Fix", "bug", "tomorrow", "#backend"]);
        match cli.command {
            Commands::Parse(args) => assert_eq!(args.joined(), "Fix bug tomorrow #backend"),
            _ => panic!("expected parse"),
        }
    }

    #[test]
    fn test_parse_alias() {
        let cli = Cli::parse_from(["quickadd", "p", "task"]);
        assert!(matches!(cli.command, Commands::Parse(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["quickadd", "date", "tomorrow", "-o", "json", "--now", "2025-01-15"]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.now.as_deref(), Some("2025-01-15"));
    }

    #[test]
    fn test_reference_time_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        for value in [
            "2025-01-15T12:00",
            "2025-01-15T12:00:00",
            "2025-01-15 12:00",
            " 2025-01-15 12:00:00 ",
        ] {
            assert_eq!(parse_reference_time(value).unwrap(), expected, "{value}");
        }

        let midnight = parse_reference_time("2025-01-15").unwrap();
        assert_eq!(midnight, expected.date().and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_reference_time_rejects_garbage() {
        let err = parse_reference_time("yesterday-ish").unwrap_err();
        assert!(matches!(err, QuickAddError::InvalidArgument(_)));
    }
}
