//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with command output on stdout.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::QuickAddError;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level when it is set.
/// Does nothing when logging is disabled or a subscriber already exists.
///
/// # Errors
///
/// Returns `QuickAddError::Config` if the configured level is not a valid
/// filter directive.
pub fn init(config: &LoggingConfig) -> Result<(), QuickAddError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = build_filter(config)?;

    // A subscriber may already be installed (tests, embedding callers)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    Ok(())
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, QuickAddError> {
    match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => Ok(EnvFilter::from_default_env()),
        _ => EnvFilter::try_new(&config.level).map_err(|e| {
            QuickAddError::Config(format!("Invalid logging level '{}': {e}", config.level))
        }),
    }
}
