use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::time::Duration;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Truelist API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Batch dispatch settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Truelist API settings
///
/// The API key is deliberately absent here: it is supplied through the
/// `TRUELIST_API_KEY` environment variable so config files stay free of
/// secrets.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    /// Service endpoint URL; empty means the public API
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Batch dispatch settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchConfig {
    /// Addresses verified concurrently per group
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Delay in milliseconds between consecutive groups
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

impl BatchConfig {
    /// Inter-group delay as a `Duration`
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_batch_size() -> usize {
    // Truelist allows 5 concurrent verifications per client
    5
}

fn default_batch_delay_ms() -> u64 {
    // Keeps consecutive groups under the per-second rate ceiling
    600
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !self.api.endpoint.is_empty() {
            Url::parse(&self.api.endpoint)
                .map_err(|e| anyhow!("Invalid API endpoint '{}': {}", self.api.endpoint, e))?;
        }

        if self.api.timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be at least 1 second"));
        }

        if self.batch.batch_size == 0 {
            return Err(anyhow!("Batch size must be at least 1"));
        }

        Ok(())
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig::default(),
            batch: BatchConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
