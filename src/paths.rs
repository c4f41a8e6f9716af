//! Filesystem locations used by issue-digest
//!
//! ```text
//! $XDG_CONFIG_HOME/issue-digest/
//! └── config.toml        # token, repositories, digest defaults
//! ```
//!
//! `ISSUE_DIGEST_CONFIG` points at a different config file.

use std::path::PathBuf;

/// Application directory name under the user config directory
pub const APP_DIR: &str = "issue-digest";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "ISSUE_DIGEST_CONFIG";

/// Directory holding the config file
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Config file path, honouring `ISSUE_DIGEST_CONFIG`
#[must_use]
pub fn config_file() -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => config_dir().join(CONFIG_FILE),
    }
}
