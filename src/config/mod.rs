//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! Weather coordinates live here because the deck has no geolocation service to
//! ask: the user states where they are once, and the weather tool reuses it.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedDeck";

/// Temperature unit used by the weather tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub temperature_unit: Option<TemperatureUnit>,
    /// Latitude in decimal degrees for the weather tool.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees for the weather tool.
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            temperature_unit: Some(TemperatureUnit::Celsius),
            latitude: None,
            longitude: None,
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            language: Some("fr".to_string()),
            temperature_unit: Some(TemperatureUnit::Fahrenheit),
            latitude: Some(48.8566),
            longitude: Some(2.3522),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.language, config.language);
        assert_eq!(loaded.temperature_unit, config.temperature_unit);
        assert_eq!(loaded.latitude, config.latitude);
        assert_eq!(loaded.longitude, config.longitude);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.language.is_none());
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested_dir = temp_dir.path().join("deep").join("path");
        let config_path = nested_dir.join("settings.toml");
        let config = Config {
            language: Some("en-US".to_string()),
            ..Config::default()
        };

        save_to_path(&config, &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn default_config_uses_celsius_and_no_coordinates() {
        let config = Config::default();
        assert_eq!(config.temperature_unit, Some(TemperatureUnit::Celsius));
        assert!(config.latitude.is_none());
        assert!(config.longitude.is_none());
    }

    #[test]
    fn unit_round_trips_through_lowercase_toml() {
        let toml_str = "temperature_unit = \"fahrenheit\"";
        let config: Config = toml::from_str(toml_str).expect("unit should parse");
        assert_eq!(config.temperature_unit, Some(TemperatureUnit::Fahrenheit));
    }
}
