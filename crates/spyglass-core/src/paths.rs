//! Filesystem paths for configuration and logs

use std::path::PathBuf;

use crate::constants::fs;

/// Root config directory (`~/.spyglass`), falling back to a relative
/// directory when no home directory can be resolved.
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(fs::CONFIG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(fs::CONFIG_DIR_NAME))
}

/// Default config file location
pub fn config_file() -> PathBuf {
    config_dir().join(fs::CONFIG_FILE_NAME)
}

/// Directory for log files
pub fn logs_dir() -> PathBuf {
    config_dir().join(fs::LOGS_DIR_NAME)
}
