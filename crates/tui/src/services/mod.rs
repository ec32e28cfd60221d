//! Business logic services
//!
//! This module contains all API interaction logic separated from the UI layer.

pub mod api;

pub use api::ApiService;
