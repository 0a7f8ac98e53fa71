//! Configuration management for quickadd.
//!
//! This module handles loading and saving configuration from `~/.quickadd/`.

mod paths;
mod settings;

pub use paths::config_file_for;
pub use settings::{ColorSetting, Config, GeneralConfig, LoggingConfig};
