//! # Configuration Management Module
//!
//! All runtime tuning for snitchbot lives in a single TOML file, organized
//! into logical sections:
//!
//! - `[api]` - remote status endpoint and credentials ([`ApiConfig`])
//! - `[delivery]` - retry budget and timers ([`crate::poster::DeliveryConfig`])
//! - `[source]` - source file acceptance limits ([`SourceConfig`])
//! - `[logging]` - log level and optional log file ([`LoggingConfig`])
//!
//! ## Usage
//!
//! ```rust,no_run
//! use snitchbot::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("Posting to: {}", config.api.url);
//!
//!     // Create a starter configuration
//!     Config::create_default("config.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! Every section has sensible defaults, so a partial file parses; `snitchbot
//! init` writes the full default file to start from.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::poster::DeliveryConfig;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote status endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Endpoint that accepts status updates via POST.
    pub url: String,
    /// Bearer token for the endpoint. Empty means unconfigured; `post` will
    /// refuse to run until one is set.
    pub api_key: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "https://api.example.com/statuses/update".to_string(),
            api_key: String::new(),
            timeout_seconds: 10,
        }
    }
}

/// Limits applied to the scanned source file before it is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Largest source file we are willing to read, in bytes.
    pub max_file_bytes: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            delivery: DeliveryConfig::default(),
            source: SourceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file.
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
