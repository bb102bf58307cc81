//! # Configuration
//!
//! Paths to the two order sources, loaded from a TOML file with environment
//! overrides:
//!
//! ```toml
//! database_path = "./bookstore.db"
//! workbook_path = "./orders.xlsx"
//! ```
//!
//! Lookup order: `BOOKWORLD_CONFIG` env path, then the platform config
//! directory, then built-in defaults. `BOOKWORLD_DATABASE_PATH` and
//! `BOOKWORLD_WORKBOOK_PATH` override individual fields last.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::OrdersResult;

/// Configuration for the order subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdersConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Path to the externally-authored order workbook.
    pub workbook_path: PathBuf,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        OrdersConfig {
            database_path: PathBuf::from("./bookstore.db"),
            workbook_path: PathBuf::from("./orders.xlsx"),
        }
    }
}

impl OrdersConfig {
    /// Loads configuration from the standard lookup chain.
    pub fn load() -> Self {
        let path = std::env::var_os("BOOKWORLD_CONFIG")
            .map(PathBuf::from)
            .or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => match Self::load_from(&path) {
                Ok(config) => {
                    info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "Unreadable config file; using defaults"
                    );
                    OrdersConfig::default()
                }
            },
            _ => {
                debug!("No config file found; using defaults");
                OrdersConfig::default()
            }
        };

        config.apply_env_overrides();
        config
    }

    /// Loads configuration from a specific TOML file.
    pub fn load_from(path: impl AsRef<Path>) -> OrdersResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(path) = std::env::var_os("BOOKWORLD_DATABASE_PATH") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(path) = std::env::var_os("BOOKWORLD_WORKBOOK_PATH") {
            self.workbook_path = PathBuf::from(path);
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("ru", "BookWorld", "bookworld")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_working_directory() {
        let config = OrdersConfig::default();
        assert_eq!(config.database_path, PathBuf::from("./bookstore.db"));
        assert_eq!(config.workbook_path, PathBuf::from("./orders.xlsx"));
    }

    #[test]
    fn loads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"database_path = "/data/shop.db""#).unwrap();
        writeln!(file, r#"workbook_path = "/data/orders.xlsx""#).unwrap();

        let config = OrdersConfig::load_from(file.path()).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/data/shop.db"));
        assert_eq!(config.workbook_path, PathBuf::from("/data/orders.xlsx"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"workbook_path = "/srv/orders.xlsx""#).unwrap();

        let config = OrdersConfig::load_from(file.path()).unwrap();
        assert_eq!(config.database_path, PathBuf::from("./bookstore.db"));
        assert_eq!(config.workbook_path, PathBuf::from("/srv/orders.xlsx"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_path = [not toml").unwrap();

        assert!(matches!(
            OrdersConfig::load_from(file.path()),
            Err(crate::OrdersError::ConfigParse(_))
        ));
    }
}
