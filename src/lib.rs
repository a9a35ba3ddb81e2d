//! # pergaminos-rs
//!
//! Async client for the Pergaminos document digitization API.
//!
//! ## Features
//!
//! - **REST client**: companies, projects, documents, users, QA agents and
//!   the document assistant
//! - **Task polling**: follow server jobs with an interval, a hard deadline
//!   and cancellation
//! - **Batch edits**: stage renames and reorders locally, submit them at once
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pergaminos_rs::{ApiClient, ClientConfig, DocumentProcessor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let client = ApiClient::from_config(&config)?;
//!     client.login("admin@pergaminos.com", "admin123").await?;
//!
//!     let mut processor = DocumentProcessor::new(client, config.polling.clone());
//!     processor.select_project_by_id("project-id").await?;
//!     processor.apply_name_pattern("DOC_{numero}_{fecha}")?;
//!     processor.edits_mut().apply_order_rule("alfabético");
//!
//!     processor
//!         .submit_changes(
//!             |task| println!("{:?} {}%", task.status, task.percent()),
//!             |task| println!("finished: {:?}", task.status),
//!         )
//!         .await?;
//!     if let Some(outcome) = processor.wait().await {
//!         if let Some(task) = outcome.task().filter(|t| t.is_completed()) {
//!             processor.download_result(task, std::path::Path::new(".")).await?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod cli;
pub mod config;
pub mod core;
pub mod sdk;
pub mod utils;

// Re-export main types
pub use config::ClientConfig;
pub use core::batch::{BatchEditReconciler, DocumentChange, EditField, NamingContext, OrderRule};
pub use core::processor::{DocumentProcessor, SubmitOutcome};
pub use core::task::{PollHandle, PollOptions, PollOutcome, Task, TaskPoller, TaskStatus};
pub use sdk::{ApiClient, Result, SDKError, Session};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp, seconds since the epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
