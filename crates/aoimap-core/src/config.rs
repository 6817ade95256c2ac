use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AoimapError, Result};
use crate::geocode::nominatim;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Initial map center and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
}

/// Default home position: Düsseldorf, inside the default satellite layer's
/// imagery coverage.
pub const DEFAULT_HOME: MapPosition = MapPosition { lat: 51.2277, lon: 6.7735, zoom: 12 };

/// Default session state file, relative to the working directory.
pub const DEFAULT_STATE_PATH: &str = "aoimap-state.json";

/// Layered configuration for aoimap
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub geocoder_url: ConfigValue<String>,
    pub search_limit: ConfigValue<usize>,
    pub state_path: ConfigValue<PathBuf>,
    pub home: ConfigValue<MapPosition>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            geocoder_url: ConfigValue::new(
                nominatim::DEFAULT_BASE_URL.to_string(),
                ConfigSource::Default,
            ),
            search_limit: ConfigValue::new(nominatim::DEFAULT_LIMIT, ConfigSource::Default),
            state_path: ConfigValue::new(PathBuf::from(DEFAULT_STATE_PATH), ConfigSource::Default),
            home: ConfigValue::new(DEFAULT_HOME, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| AoimapError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| AoimapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(geocoder_url) = file_config.geocoder_url {
            self.geocoder_url.update(geocoder_url, ConfigSource::File);
        }

        if let Some(search_limit) = file_config.search_limit {
            self.search_limit.update(search_limit, ConfigSource::File);
        }

        if let Some(state_path) = file_config.state_path {
            self.state_path.update(state_path, ConfigSource::File);
        }

        if let Some(home) = file_config.home {
            self.home.update(home, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(url) = env::var("AOIMAP_GEOCODER_URL") {
            self.geocoder_url.update(url, ConfigSource::Environment);
        }

        if let Ok(limit_str) = env::var("AOIMAP_SEARCH_LIMIT") {
            match limit_str.parse::<usize>() {
                Ok(limit) => self.search_limit.update(limit, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid AOIMAP_SEARCH_LIMIT value '{}': expected a positive integer",
                    limit_str
                ),
            }
        }

        if let Ok(path) = env::var("AOIMAP_STATE_PATH") {
            self.state_path.update(PathBuf::from(path), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(geocoder_url) = overrides.geocoder_url {
            self.geocoder_url.update(geocoder_url, ConfigSource::Cli);
        }

        if let Some(search_limit) = overrides.search_limit {
            self.search_limit.update(search_limit, ConfigSource::Cli);
        }

        if let Some(state_path) = overrides.state_path {
            self.state_path.update(state_path, ConfigSource::Cli);
        }
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    geocoder_url: Option<String>,
    search_limit: Option<usize>,
    state_path: Option<PathBuf>,
    home: Option<MapPosition>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub geocoder_url: Option<String>,
    pub search_limit: Option<usize>,
    pub state_path: Option<PathBuf>,
}
