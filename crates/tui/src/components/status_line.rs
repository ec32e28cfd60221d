//! Status line component
//!
//! Shows the latest informational message or request failure in a single
//! line at the bottom of the screen, color coded by severity. Request
//! failures land here and nowhere else; there is no retry and no error
//! banner beyond this line.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};
use tracing::debug;

/// Severity levels for status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusSeverity {
    /// Informational message (blue)
    Info,
    /// Warning that doesn't block operation (yellow)
    Warning,
    /// Failed request or other error (red)
    Error,
}

impl StatusSeverity {
    /// Color associated with this severity level.
    pub fn color(&self) -> Color {
        match self {
            StatusSeverity::Info => Color::Blue,
            StatusSeverity::Warning => Color::Yellow,
            StatusSeverity::Error => Color::Red,
        }
    }

    /// Prefix symbol for this severity level.
    pub fn symbol(&self) -> &'static str {
        match self {
            StatusSeverity::Info => "ℹ",
            StatusSeverity::Warning => "⚠",
            StatusSeverity::Error => "✗",
        }
    }
}

/// A status message to display.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// The severity level of this message
    pub severity: StatusSeverity,
    /// The message text to display
    pub message: String,
    /// When this message was created
    pub timestamp: DateTime<Utc>,
}

impl StatusMessage {
    /// Create a new info message.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: StatusSeverity::Info,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new warning message.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: StatusSeverity::Warning,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: StatusSeverity::Error,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Formatted display text for this message.
    pub fn display_text(&self) -> String {
        format!("{} {}", self.severity.symbol(), self.message)
    }
}

/// Status line component holding the latest message.
#[derive(Debug, Default)]
pub struct StatusLine {
    current_message: Option<StatusMessage>,
}

impl StatusLine {
    /// Create a new status line component.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current status message.
    pub fn set_message(&mut self, message: StatusMessage) {
        debug!(
            severity = ?message.severity,
            message = %message.message,
            "Setting status line message"
        );
        self.current_message = Some(message);
    }

    /// Clear the current status message.
    pub fn clear(&mut self) {
        self.current_message = None;
    }

    /// Get the current message, if any.
    pub fn current_message(&self) -> Option<&StatusMessage> {
        self.current_message.as_ref()
    }

    /// Render the status line widget.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let (text, style) = match &self.current_message {
            Some(message) => (
                message.display_text(),
                Style::default()
                    .fg(message.severity.color())
                    .add_modifier(Modifier::BOLD),
            ),
            None => (
                "r: reload | t: topic | /: search | Enter: open | ?: help | q: quit".to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        };

        f.render_widget(Paragraph::new(text).style(style), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_display() {
        let mut line = StatusLine::new();
        line.set_message(StatusMessage::error("HTTP 500"));

        let current = line.current_message().unwrap();
        assert_eq!(current.severity, StatusSeverity::Error);
        assert_eq!(current.display_text(), "✗ HTTP 500");

        line.clear();
        assert!(line.current_message().is_none());
    }
}
