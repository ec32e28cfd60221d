//! Shared types for the fatwa browser client.
//!
//! This crate holds everything the TUI binary and its tests agree on:
//! the API data models, query construction, the error taxonomy, and
//! configuration loading.

pub mod config;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{ClientError, ConfigError, Error, Result};
