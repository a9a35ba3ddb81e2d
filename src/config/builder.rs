//! Configuration builder

use super::ClientConfig;
use crate::sdk::errors::Result;
use std::path::PathBuf;
use std::time::Duration;

/// Builder for client configurations
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: ClientConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// API base URL including the `/api` prefix
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api.base_url = url.into();
        self
    }

    /// Request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.api.timeout = timeout.as_secs().max(1);
        self
    }

    /// Extra attempts for idempotent requests
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.api.max_retries = retries;
        self
    }

    /// Persist the session token in `path`
    pub fn token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.session.token_path = Some(path.into());
        self
    }

    /// Polling for rename/reorder processing
    pub fn process_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.config.polling.process_interval_ms = interval.as_millis() as u64;
        self.config.polling.process_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Polling for semantic reorder
    pub fn reorder_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.config.polling.reorder_interval_ms = interval.as_millis() as u64;
        self.config.polling.reorder_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Log filter directive
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Build the configuration with validation
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate_all()?;
        Ok(self.config)
    }
}
