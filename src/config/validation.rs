//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use tracing::debug;
use url::Url;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for ApiSettings {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating API settings");

        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("base_url has invalid URL format: {}", e))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(format!(
                    "base_url must use http:// or https:// scheme, got: {}",
                    scheme
                ));
            }
        }
        if url.host_str().is_none() {
            return Err("base_url must have a valid host".to_string());
        }

        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }
        if self.max_retries > 10 {
            return Err(format!(
                "max_retries must be at most 10, got: {}",
                self.max_retries
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for PollingSettings {
    fn validate(&self) -> Result<(), String> {
        let flows = [
            ("process", self.process_interval_ms, self.process_timeout_ms),
            ("reorder", self.reorder_interval_ms, self.reorder_timeout_ms),
        ];
        for (flow, interval, timeout) in flows {
            if interval == 0 {
                return Err(format!("{} interval must be greater than 0", flow));
            }
            if interval >= timeout {
                return Err(format!(
                    "{} interval ({}ms) must be shorter than its timeout ({}ms)",
                    flow, interval, timeout
                ));
            }
        }
        Ok(())
    }
}

impl Validate for LoggingSettings {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("log level cannot be empty".to_string());
        }
        Ok(())
    }
}
