//! End-to-end tests for pergaminos-rs
//!
//! These tests run against a live backend and are ignored by default.
//! Run with: cargo test -- --ignored
//!
//! Required environment variables:
//! - PERGAMINOS_E2E_URL: API base URL, e.g. `http://localhost:8001/api`
//!
//! Optional:
//! - PERGAMINOS_E2E_EMAIL / PERGAMINOS_E2E_PASSWORD: staff credentials,
//!   default to the bootstrap administrator

pub mod live_backend;
