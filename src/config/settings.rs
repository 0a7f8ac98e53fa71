//! Configuration settings for quickadd.
//!
//! Settings are loaded from `~/.quickadd/config.yaml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::QuickAddError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Diagnostic logging settings.
    pub logging: LoggingConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply the setting to all `colored` output of this process.
    ///
    /// `Auto` leaves the decision to `colored`, which honours `NO_COLOR`
    /// and whether stdout is a terminal.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Diagnostic logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Install the stderr log subscriber at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, QuickAddError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            QuickAddError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        // An empty file deserializes to null
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| {
            QuickAddError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), QuickAddError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                QuickAddError::Config(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        std::fs::write(path, self.to_yaml()?).map_err(|e| {
            QuickAddError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Render the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, QuickAddError> {
        serde_yaml::to_string(self)
            .map_err(|e| QuickAddError::Config(format!("Failed to serialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert!(config.logging.enabled);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        // Should return defaults when file doesn't exist
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_empty_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "\n").unwrap();

        assert_eq!(Config::load_from_path(&config_path).unwrap(), Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sub").join("config.yaml");

        let mut config = Config::default();
        config.general.default_output = OutputFormat::Json;
        config.general.color = ColorSetting::Never;
        config.logging.level = "quickadd=debug".to_string();

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        // Write a partial config (only some fields)
        let partial_yaml = r"
general:
  default_output: json
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        // Custom value should be loaded
        assert_eq!(config.general.default_output, OutputFormat::Json);
        // Defaults should be used for missing fields
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "general:\n  color: sometimes\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, QuickAddError::Config(_)));
    }

    #[test]
    fn test_yaml_field_names() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("default_output: pretty"));
        assert!(yaml.contains("color: auto"));
        assert!(yaml.contains("level: warn"));
    }
}
