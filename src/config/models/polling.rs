//! Task polling configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Interval and hard timeout for the two server job flows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollingSettings {
    /// Rename/reorder processing: poll interval in milliseconds
    #[serde(default = "default_process_interval_ms")]
    pub process_interval_ms: u64,
    /// Rename/reorder processing: give up after this many milliseconds
    #[serde(default = "default_process_timeout_ms")]
    pub process_timeout_ms: u64,
    /// Semantic reorder: poll interval in milliseconds
    #[serde(default = "default_reorder_interval_ms")]
    pub reorder_interval_ms: u64,
    /// Semantic reorder: give up after this many milliseconds
    #[serde(default = "default_reorder_timeout_ms")]
    pub reorder_timeout_ms: u64,
}

pub fn default_process_interval_ms() -> u64 {
    3_000
}

pub fn default_process_timeout_ms() -> u64 {
    600_000
}

pub fn default_reorder_interval_ms() -> u64 {
    2_000
}

pub fn default_reorder_timeout_ms() -> u64 {
    300_000
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            process_interval_ms: default_process_interval_ms(),
            process_timeout_ms: default_process_timeout_ms(),
            reorder_interval_ms: default_reorder_interval_ms(),
            reorder_timeout_ms: default_reorder_timeout_ms(),
        }
    }
}

impl PollingSettings {
    pub fn process_interval(&self) -> Duration {
        Duration::from_millis(self.process_interval_ms)
    }

    pub fn process_timeout(&self) -> Duration {
        Duration::from_millis(self.process_timeout_ms)
    }

    pub fn reorder_interval(&self) -> Duration {
        Duration::from_millis(self.reorder_interval_ms)
    }

    pub fn reorder_timeout(&self) -> Duration {
        Duration::from_millis(self.reorder_timeout_ms)
    }

    /// Merge polling settings
    pub fn merge(mut self, other: Self) -> Self {
        if other.process_interval_ms != default_process_interval_ms() {
            self.process_interval_ms = other.process_interval_ms;
        }
        if other.process_timeout_ms != default_process_timeout_ms() {
            self.process_timeout_ms = other.process_timeout_ms;
        }
        if other.reorder_interval_ms != default_reorder_interval_ms() {
            self.reorder_interval_ms = other.reorder_interval_ms;
        }
        if other.reorder_timeout_ms != default_reorder_timeout_ms() {
            self.reorder_timeout_ms = other.reorder_timeout_ms;
        }
        self
    }
}
