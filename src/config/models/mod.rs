//! Configuration data models
//!
//! This module defines the configuration sections of the client.

pub mod api;
pub mod logging;
pub mod polling;
pub mod session;

// Re-export all configuration types
pub use api::*;
pub use logging::*;
pub use polling::*;
pub use session::*;

/// Default API base URL
pub fn default_base_url() -> String {
    "http://localhost:8001/api".to_string()
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    60
}

/// Default user agent
pub fn default_user_agent() -> String {
    format!("pergaminos-rs/{}", env!("CARGO_PKG_VERSION"))
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}
