//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use cartwheel_commerce::cart::default_storage_key;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Catalog API.
    #[serde(default)]
    pub api: ApiConfig,

    /// Cart persistence.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(&content, path.ends_with(".json"))
            .with_context(|| format!("Failed to parse config file: {}", path))
    }

    fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }
}

/// Catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL for `/stock/{id}` and `/products/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Where the cart is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Storage file, relative to the working directory unless absolute.
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_path() -> String {
    ".cartwheel/storage.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Human => "human",
            LogFormat::Json => "json",
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "error".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Generate a default cartwheel.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Cartwheel configuration

[api]
base_url = "{base_url}"
timeout_secs = {timeout_secs}

[storage]
path = "{path}"
key = "{key}"

[logging]
# Any tracing filter directive, e.g. "cartwheel_commerce=debug"
level = "{level}"
# "human" or "json"
format = "human"
"#,
        base_url = default_base_url(),
        timeout_secs = default_timeout_secs(),
        path = default_storage_path(),
        key = default_storage_key(),
        level = default_level(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.storage.path, ".cartwheel/storage.json");
        assert_eq!(config.storage.key, "cartwheel:cart");
        assert_eq!(config.logging.level, "error");
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_generated_config_matches_defaults() {
        let parsed = CliConfig::parse(&generate_default_config(), false).unwrap();
        assert_eq!(parsed, CliConfig::default());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = CliConfig::parse(
            r#"
[api]
base_url = "https://shop.example.com/api"

[logging]
format = "json"
"#,
            false,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "error");
    }

    #[test]
    fn test_load_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cartwheel.json");
        std::fs::write(&path, r#"{"storage": {"key": "shop:cart"}}"#).unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.storage.key, "shop:cart");
        assert_eq!(config.storage.path, ".cartwheel/storage.json");
    }

    #[test]
    fn test_load_reports_path_on_bad_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cartwheel.toml");
        std::fs::write(&path, "[logging]\nformat = \"xml\"\n").unwrap();

        let err = CliConfig::load(path.to_str().unwrap()).unwrap_err();
        assert!(format!("{:#}", err).contains("cartwheel.toml"));
    }
}
