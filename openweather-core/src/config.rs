use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::model::Coordinates;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";
pub const DEFAULT_LATITUDE: f64 = -20.272967;
pub const DEFAULT_LONGITUDE: f64 = 30.934364;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything the client needs for one invocation. Built once, then moved
/// into [`crate::OpenWeatherClient::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub app_id: String,
    pub coordinates: Coordinates,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_id: String::new(),
            coordinates: Coordinates::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Settings stored on disk. Every key is optional; unset keys fall back to
/// the built-in defaults.
///
/// Example TOML:
/// ```toml
/// app_id = "..."
/// latitude = 51.5
/// longitude = -0.12
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub base_url: Option<String>,
    pub app_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from `path`, or return an empty default if it doesn't
    /// exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config file at {}", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "openweathermap", "openweather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay `other` on top of `self`: keys set in `other` win.
    pub fn merge(mut self, other: Config) -> Self {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.app_id.is_some() {
            self.app_id = other.app_id;
        }
        if other.latitude.is_some() {
            self.latitude = other.latitude;
        }
        if other.longitude.is_some() {
            self.longitude = other.longitude;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            app_id: self.app_id.clone().unwrap_or(defaults.app_id),
            coordinates: Coordinates::new(
                self.latitude.unwrap_or(defaults.coordinates.lat),
                self.longitude.unwrap_or(defaults.coordinates.lon),
            ),
            timeout: self.timeout_secs.map(Duration::from_secs).unwrap_or(defaults.timeout),
        }
    }
}
