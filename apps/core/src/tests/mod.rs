//! Test Module
//!
//! Cross-module test suite for the FURIA chatbot backend.
//!
//! ## Test Categories
//! - `brain_tests`: Classification, composition and context over the built-in tables
//! - `service_tests`: Generative path and fallback degradation with mock chat models
//! - `server_tests`: HTTP routes end to end

pub mod brain_tests;
