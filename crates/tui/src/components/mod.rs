//! UI components for the fatwa browser
//!
//! Each component owns its render state and is updated through its own
//! message enum, so the app loop stays a plain dispatch function.

pub mod detail;
pub mod list;
pub mod status_line;
pub mod topics;

pub use detail::{DetailComponent, DetailMessage};
pub use list::{FatwaListComponent, ListMessage};
pub use status_line::{StatusLine, StatusMessage, StatusSeverity};
pub use topics::{TopicFilterComponent, TopicsMessage};
