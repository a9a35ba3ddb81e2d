//! Integration tests against a mock Pergaminos API

pub mod processor_tests;
