//! Common test utilities for pergaminos-rs
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::server::TestApi;
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let api = TestApi::start().await;
//!     let client = api.authed_client();
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod server;

pub use fixtures::{DocumentFactory, ProjectFactory, UserFactory};
pub use server::TestApi;

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
