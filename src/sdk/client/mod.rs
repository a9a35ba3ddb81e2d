//! Pergaminos API client
//!
//! One [`ApiClient`] per process; it is cheap to clone and every clone
//! shares the same [`Session`](crate::sdk::Session).

mod assistant;
mod auth;
mod catalog;
mod client;
mod documents;
mod processing;


pub use client::ApiClient;
