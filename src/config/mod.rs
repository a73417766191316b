//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable overriding `weather_api.api_key`
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

/// Environment variable overriding `stream.url`
pub const STREAM_URL_ENV: &str = "NATS_URL";

/// Load configuration from a YAML file, apply environment overrides and validate
pub fn load_config(path: &Path) -> Result<RelayConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let mut config: RelayConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("invalid YAML in config file {:?}", path))?;

    config.apply_overrides(
        std::env::var(API_KEY_ENV).ok(),
        std::env::var(STREAM_URL_ENV).ok(),
    );
    config.validate()?;
    Ok(config)
}
