//! Store configuration.
//!
//! Read once from `config.json` under the app data directory; every field
//! falls back to a hardcoded default when the file or the field is absent.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Chartkeeper";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const CONFIG_FILE: &str = "config.json";
const DATABASE_FILE: &str = "chartkeeper.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the SQLite database file.
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: app_data_dir().join(DATABASE_FILE),
        }
    }
}

impl StoreConfig {
    /// Parse configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Configuration from the default location.
    ///
    /// A missing or unreadable file yields the defaults; the store must
    /// stay reachable even when the config file is gone.
    pub fn load_or_default() -> Self {
        let path = app_data_dir().join(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Falling back to default configuration: {e}");
                Self::default()
            }
        }
    }
}

/// Get the application data directory
/// ~/Chartkeeper/ on all platforms (user-visible, next to the user's documents)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "chartkeeper=debug,info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Chartkeeper"));
    }

    #[test]
    fn default_database_path_under_app_data() {
        let config = StoreConfig::default();
        assert!(config.database_path.starts_with(app_data_dir()));
        assert!(config.database_path.ends_with("chartkeeper.db"));
    }

    #[test]
    fn load_from_reads_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"database_path": "/tmp/records.db"}"#).unwrap();

        let config = StoreConfig::load_from(&path).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/records.db"));
    }

    #[test]
    fn load_from_defaults_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        let config = StoreConfig::load_from(&path).unwrap();
        assert_eq!(config.database_path, StoreConfig::default().database_path);
    }

    #[test]
    fn load_from_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let result = StoreConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = StoreConfig::load_from(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
