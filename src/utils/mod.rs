//! Utility modules
//!
//! - **logging**: tracing subscriber setup
//! - **retry**: bounded retry with exponential backoff

pub mod logging;
pub mod retry;

pub use logging::init_logging;
pub use retry::{RetryConfig, RetryPolicy};
