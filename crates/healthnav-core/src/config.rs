use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::GeoPoint;

/// Main configuration structure
///
/// Loaded once at startup from the config file; the core never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Fall back to the bundled demo dataset when the backend is unreachable
    #[serde(default = "default_mock_fallback")]
    pub enable_mock_fallback: bool,

    /// Default search radius in miles
    #[serde(default = "default_radius")]
    pub default_radius: f64,

    /// Default search origin when the user hasn't picked a location
    #[serde(default = "default_location")]
    pub default_location: GeoPoint,

    /// How often the advisory health probe runs, in seconds
    #[serde(default = "default_probe_interval")]
    pub probe_interval_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

fn default_mock_fallback() -> bool {
    true // the app should keep working offline
}

fn default_radius() -> f64 {
    25.0
}

fn default_location() -> GeoPoint {
    // Phoenix, AZ
    GeoPoint {
        lat: 33.4484,
        lng: -112.0740,
    }
}

fn default_probe_interval() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            enable_mock_fallback: default_mock_fallback(),
            default_radius: default_radius(),
            default_location: default_location(),
            probe_interval_secs: default_probe_interval(),
        }
    }
}

impl Config {
    /// Load config from the default location, or use defaults if absent
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            // No config file? Use defaults
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the config file path
    /// Uses XDG on Linux/macOS, AppData on Windows
    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::Config("Could not find config directory".into()))?
            .join("healthnav");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000/api/v1");
        assert!(config.enable_mock_fallback);
        assert_eq!(config.default_radius, 25.0);
        assert_eq!(config.default_location.lat, 33.4484);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("api_url"));
        assert!(toml.contains("enable_mock_fallback"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("api_url = \"http://backend:9000/api/v1\"").unwrap();
        assert_eq!(config.api_url, "http://backend:9000/api/v1");
        assert!(config.enable_mock_fallback);
        assert_eq!(config.default_radius, 25.0);
    }
}
