use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Deserializer, Serialize};

use crate::resilience::RetryPolicy;

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://groupietrackers.herokuapp.com/api";
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

/// Configuration for encore.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (ENCORE_* prefix)
/// 3. Config file (~/.config/encore/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalog source serving `artists`, `locations`,
    /// `dates`, and `relation`.
    ///
    /// Can be set via:
    /// - ENV: ENCORE_CATALOG_BASE_URL
    /// - Config: catalog_base_url = "..."
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,

    /// Base URL of the geocoding provider.
    #[serde(default = "default_geocode_base_url")]
    pub geocode_base_url: String,

    /// Mapbox access token (required for geocoding).
    ///
    /// Can be set via:
    /// - ENV: ENCORE_MAPBOX_TOKEN
    /// - Config: mapbox_token = "..."
    pub mapbox_token: Option<String>,

    /// Total geocoding attempts per location, including the first.
    #[serde(default = "default_geocode_attempts", deserialize_with = "number_or_string")]
    pub geocode_attempts: usize,

    /// Fixed pause between geocoding attempts, in seconds.
    #[serde(default = "default_geocode_retry_delay_secs", deserialize_with = "number_or_string")]
    pub geocode_retry_delay_secs: u64,

    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_request_timeout_secs", deserialize_with = "number_or_string")]
    pub request_timeout_secs: u64,

    /// Log level: trace, debug, info, warn, or error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_base_url: default_catalog_base_url(),
            geocode_base_url: default_geocode_base_url(),
            mapbox_token: None,
            geocode_attempts: default_geocode_attempts(),
            geocode_retry_delay_secs: default_geocode_retry_delay_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/encore/config.toml
    /// Reads environment variables with ENCORE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new()
            .context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path.to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("encore");
        builder.add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// The geocoding retry policy described by this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.geocode_attempts,
            Duration::from_secs(self.geocode_retry_delay_secs),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Environment overrides arrive as strings, so numeric keys accept either.
fn number_or_string<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn default_catalog_base_url() -> String {
    DEFAULT_CATALOG_BASE_URL.to_string()
}

fn default_geocode_base_url() -> String {
    DEFAULT_GEOCODE_BASE_URL.to_string()
}

fn default_geocode_attempts() -> usize {
    3
}

fn default_geocode_retry_delay_secs() -> u64 {
    2
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    String::from("info")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/encore/config.toml
/// - macOS: ~/Library/Application Support/encore/config.toml
/// - Windows: %APPDATA%\encore\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("encore")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Encore Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (ENCORE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Mapbox access token used to geocode concert locations
#
# Create one at: https://account.mapbox.com/access-tokens/
#
# Can also be set via:
# - Environment: ENCORE_MAPBOX_TOKEN=your-token-here
mapbox_token = "your-mapbox-token-here"

# Catalog source serving artists, locations, dates, and relation
#catalog_base_url = "https://groupietrackers.herokuapp.com/api"

# Geocoding endpoint
#geocode_base_url = "https://api.mapbox.com/geocoding/v5/mapbox.places"

# Attempts per location and the fixed pause between them
#geocode_attempts = 3
#geocode_retry_delay_secs = 2

# HTTP timeout for every request
#request_timeout_secs = 30

# One of: trace, debug, info, warn, error
#log_level = "info"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    write_config_file_at(&config_file_path())
}

fn write_config_file_at(config_path: &std::path::Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config())
        .context("Failed to write config file")?;

    Ok(true)
}
