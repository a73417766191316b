//! Configuration schema definitions

use crate::error::ConfigError;
use crate::upstream::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Main configuration for the relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Upstream weather API settings
    #[serde(default)]
    pub weather_api: WeatherApiConfig,

    /// Message stream connection
    #[serde(default)]
    pub stream: StreamConfig,

    /// Cities to fetch and publish, in publish order
    #[serde(default)]
    pub cities: Vec<CityConfig>,

    /// Read-side settings
    #[serde(default)]
    pub reader: ReaderConfig,
}

impl RelayConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stream.url.trim().is_empty() {
            return Err(ConfigError::MissingStreamUrl);
        }

        if self.cities.is_empty() {
            return Err(ConfigError::NoCities);
        }

        let mut seen = HashSet::new();
        for city in &self.cities {
            validate_city_key(&city.key)?;
            if !seen.insert(city.key.as_str()) {
                return Err(ConfigError::DuplicateCityKey(city.key.clone()));
            }
        }

        for key in &self.reader.cities {
            validate_city_key(key)?;
        }

        Ok(())
    }

    /// Replace file values with environment-provided ones, when set
    pub fn apply_overrides(&mut self, api_key: Option<String>, stream_url: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            self.weather_api.api_key = Some(key);
        }
        if let Some(url) = stream_url.filter(|u| !u.is_empty()) {
            self.stream.url = url;
        }
    }
}

/// City keys become subject tokens: lowercase ASCII, digits, underscores
fn validate_city_key(key: &str) -> Result<(), ConfigError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidCityKey(key.to_string()))
    }
}

/// weatherapi.com settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    /// API key (WEATHER_API_KEY overrides)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL (default: https://api.weatherapi.com/v1)
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }

/// Stream connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// NATS server URL (NATS_URL overrides; default: nats://localhost:4222)
    #[serde(default = "default_stream_url")]
    pub url: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { url: default_stream_url() }
    }
}

fn default_stream_url() -> String { "nats://localhost:4222".to_string() }

/// A city to publish
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityConfig {
    /// Name sent to the weather API and carried in records
    pub name: String,

    /// Subject token, e.g. `saint_petersburg`
    pub key: String,
}

/// Read-side settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// City keys served to the presentation layer
    #[serde(default = "default_reader_cities")]
    pub cities: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { cities: default_reader_cities() }
    }
}

fn default_reader_cities() -> Vec<String> {
    vec!["moscow".to_string(), "saint_petersburg".to_string()]
}
