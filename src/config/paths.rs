//! Where the config file lives.
//!
//! `--config` or `QUICKADD_CONFIG` name it directly; otherwise it is
//! `~/.quickadd/config.yaml`.

use std::path::{Path, PathBuf};

use crate::error::QuickAddError;

const CONFIG_DIR: &str = ".quickadd";
const CONFIG_FILE: &str = "config.yaml";

/// The config file to read, honoring an explicitly given path.
///
/// # Errors
///
/// Returns an error if no path was given and `HOME` is not set.
pub fn config_file_for(explicit: Option<&Path>) -> Result<PathBuf, QuickAddError> {
    resolve(explicit, std::env::var_os("HOME").map(PathBuf::from))
}

fn resolve(explicit: Option<&Path>, home: Option<PathBuf>) -> Result<PathBuf, QuickAddError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    home.filter(|home| !home.as_os_str().is_empty())
        .map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
        .ok_or_else(|| QuickAddError::Config("Could not determine home directory".to_string()))
}
