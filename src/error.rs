//! Error types for quickadd.
//!
//! Parsing itself never fails; these errors come from the outer surfaces
//! (configuration, command-line arguments, output).

use thiserror::Error;

/// Errors raised by the CLI, configuration and output layers.
#[derive(Error, Debug)]
pub enum QuickAddError {
    /// Configuration file could not be read, parsed or written.
    #[error("config error: {0}")]
    Config(String),

    /// A command-line argument was malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("json error: {0}")]
    Parse(#[from] serde_json::Error),
}
