//! API connection configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Settings for the REST connection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSettings {
    /// Base URL including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Extra attempts for idempotent GET requests. 0 disables retrying.
    #[serde(default)]
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// User agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            max_retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiSettings {
    /// Merge API settings (other takes precedence when not default)
    pub fn merge(mut self, other: Self) -> Self {
        if other.base_url != default_base_url() {
            self.base_url = other.base_url;
        }
        if other.timeout != default_timeout() {
            self.timeout = other.timeout;
        }
        if other.max_retries != 0 {
            self.max_retries = other.max_retries;
        }
        if other.retry_delay_ms != default_retry_delay_ms() {
            self.retry_delay_ms = other.retry_delay_ms;
        }
        if other.user_agent != default_user_agent() {
            self.user_agent = other.user_agent;
        }
        self
    }
}
