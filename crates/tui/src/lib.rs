//! # Fatwa TUI
//!
//! A terminal client for a draft-fatwa knowledge base. It lists records,
//! filters by topic and search text, shows a detail view with references
//! and feedback, and posts new feedback comments to the remote API.
//!
//! ## Architecture
//!
//! The client follows a message-driven component architecture:
//!
//! - **Components**: list, detail, topic filter, and status line widgets,
//!   each updated through its own message enum
//! - **Services**: the API layer, separated from the UI
//! - **App loop**: terminal events and async fetch completions feed one
//!   update function; fetches run on spawned tasks so the UI never blocks

pub mod app;
pub mod client;
pub mod components;
pub mod services;

pub use app::App;
pub use fatwa_common::{Config, Error, Result};
