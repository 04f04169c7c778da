//! Runtime settings for tools that open the staging store.
//!
//! # Responsibility
//! - Carry store path and logging settings resolved by a front-end.
//! - Provide the value validators front-ends run on raw input.
//!
//! # Invariants
//! - A configured log directory is always absolute.
//! - `log_level` is always one of `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DEFAULT_DB_FILE_NAME: &str = "entity_sync.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    InvalidLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::InvalidLogDir(value) => {
                write!(f, "log directory must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings shared by every entry point that opens the staging store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

/// Validates a log level name; accepts any case and `warning` for `warn`.
pub fn parse_log_level(value: &str) -> Result<&'static str, ConfigError> {
    normalize_level(value).map_err(ConfigError::InvalidLogLevel)
}

/// Validates a log directory; it must be absolute.
pub fn parse_log_dir(value: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = value.trim();
    let dir = PathBuf::from(trimmed);
    if trimmed.is_empty() || !dir.is_absolute() {
        return Err(ConfigError::InvalidLogDir(value.to_string()));
    }
    Ok(dir)
}
