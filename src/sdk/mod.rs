//! Pergaminos REST SDK
//!
//! [`ApiClient`] talks to the API on behalf of a [`Session`]; every failure
//! is an [`SDKError`] that can render a user facing message.

pub mod client;
pub mod errors;
pub mod session;
pub mod types;

pub use client::ApiClient;
pub use errors::{Result, SDKError};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use types::*;
