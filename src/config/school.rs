//! School configuration loading from config.toml
//!
//! The `[school]` table provides the defaults written into the settings collection at
//! startup: the school's name and address shown on printed documents, and the language
//! the bot answers in until someone switches it.

use crate::errors::{Error, Result};
use crate::i18n::Language;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "DRIVEBUDDY_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// School identity and defaults
    #[serde(default)]
    pub school: SchoolConfig,
    /// Whether the fixed sample data is loaded into an empty database
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            school: SchoolConfig::default(),
            seed_sample_data: default_true(),
        }
    }
}

/// Identity of the school printed on receipts and student files
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SchoolConfig {
    /// Display name
    #[serde(default = "default_school_name")]
    pub name: String,
    /// Postal address
    #[serde(default)]
    pub address: String,
    /// Language used until changed through the settings command
    #[serde(default)]
    pub default_language: Language,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            name: default_school_name(),
            address: String::new(),
            default_language: Language::default(),
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_school_name() -> String {
    "مدرسة النجاح لتعليم السياقة".to_string()
}

/// Loads the configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the configuration from `DRIVEBUDDY_CONFIG` or `./config.toml`.
///
/// A missing file is not an error: the built-in defaults are used instead. A file that
/// exists but cannot be parsed is.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        warn!("Config file {path} not found, using defaults");
        return Ok(AppConfig::default());
    }
    load_config(&path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_school_config() {
        let toml_str = r#"
            seed_sample_data = false

            [school]
            name = "Auto-école Najah"
            address = "Avenue Hassan II, Rabat"
            default_language = "fr"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert!(!config.seed_sample_data);
        assert_eq!(config.school.name, "Auto-école Najah");
        assert_eq!(config.school.address, "Avenue Hassan II, Rabat");
        assert_eq!(config.school.default_language, Language::French);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.seed_sample_data);
        assert_eq!(config.school, SchoolConfig::default());
        assert_eq!(config.school.default_language, Language::Arabic);
    }

    #[test]
    fn test_default_matches_empty_file() {
        let from_default = AppConfig::default();
        let from_empty = parse_config("").unwrap();
        assert!(from_default.seed_sample_data);
        assert_eq!(from_default.seed_sample_data, from_empty.seed_sample_data);
        assert_eq!(from_default.school, from_empty.school);
    }

    #[test]
    fn test_invalid_language_is_config_error() {
        let result = parse_config("[school]\ndefault_language = \"en\"\n");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_repository_config_file_parses() {
        let config = parse_config(include_str!("../../config.toml")).unwrap();
        assert!(!config.school.name.is_empty());
    }
}
