//! Client configuration
//!
//! Configuration is layered: defaults, then an optional YAML file, then
//! `PERGAMINOS_*` environment variables.

pub mod builder;
pub mod models;
pub mod validation;

pub use builder::ConfigBuilder;
pub use models::*;
pub use validation::Validate;

use crate::sdk::errors::{Result, SDKError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the client
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl ClientConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SDKError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| SDKError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply `PERGAMINOS_*` variables, read through `lookup`, over defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::default().apply_lookup(lookup)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Overlay environment values on this configuration
    pub fn apply_env(self) -> Result<Self> {
        let config = self.apply_lookup(|key| std::env::var(key).ok())?;
        config.validate_all()?;
        Ok(config)
    }

    fn apply_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: std::str::FromStr>(key: &str, value: String) -> Result<T>
        where
            T::Err: std::fmt::Display,
        {
            value
                .trim()
                .parse()
                .map_err(|e| SDKError::ConfigError(format!("Invalid {}: {}", key, e)))
        }

        if let Some(url) = lookup("PERGAMINOS_API_URL") {
            self.api.base_url = url;
        }
        if let Some(v) = lookup("PERGAMINOS_TIMEOUT_SECS") {
            self.api.timeout = parse("PERGAMINOS_TIMEOUT_SECS", v)?;
        }
        if let Some(v) = lookup("PERGAMINOS_MAX_RETRIES") {
            self.api.max_retries = parse("PERGAMINOS_MAX_RETRIES", v)?;
        }
        if let Some(path) = lookup("PERGAMINOS_TOKEN_PATH") {
            self.session.token_path = Some(path.into());
        }
        if let Some(level) = lookup("PERGAMINOS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(v) = lookup("PERGAMINOS_LOG_JSON") {
            self.logging.json = parse("PERGAMINOS_LOG_JSON", v)?;
        }
        if let Some(v) = lookup("PERGAMINOS_POLL_PROCESS_INTERVAL_MS") {
            self.polling.process_interval_ms = parse("PERGAMINOS_POLL_PROCESS_INTERVAL_MS", v)?;
        }
        if let Some(v) = lookup("PERGAMINOS_POLL_PROCESS_TIMEOUT_MS") {
            self.polling.process_timeout_ms = parse("PERGAMINOS_POLL_PROCESS_TIMEOUT_MS", v)?;
        }
        if let Some(v) = lookup("PERGAMINOS_POLL_REORDER_INTERVAL_MS") {
            self.polling.reorder_interval_ms = parse("PERGAMINOS_POLL_REORDER_INTERVAL_MS", v)?;
        }
        if let Some(v) = lookup("PERGAMINOS_POLL_REORDER_TIMEOUT_MS") {
            self.polling.reorder_timeout_ms = parse("PERGAMINOS_POLL_REORDER_TIMEOUT_MS", v)?;
        }
        Ok(self)
    }

    /// Validate the entire configuration
    pub fn validate_all(&self) -> Result<()> {
        debug!("Validating configuration");

        self.api
            .validate()
            .map_err(|e| SDKError::ConfigError(format!("API config error: {}", e)))?;
        self.polling
            .validate()
            .map_err(|e| SDKError::ConfigError(format!("Polling config error: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| SDKError::ConfigError(format!("Logging config error: {}", e)))?;

        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(self, other: Self) -> Self {
        Self {
            api: self.api.merge(other.api),
            polling: self.polling.merge(other.polling),
            session: self.session.merge(other.session),
            logging: self.logging.merge(other.logging),
        }
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SDKError::ConfigError(format!("Failed to serialize config to YAML: {}", e)))
    }
}
