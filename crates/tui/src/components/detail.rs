//! Detail view component
//!
//! Renders one full record: title, metadata, source link, question summary,
//! draft text, decoded Quran references, and the feedback thread, with a
//! comment input underneath. The record is replaced wholesale on every
//! fetch; scroll position is the only state that survives a refresh of the
//! same id.

use crossterm::event::KeyEvent;
use fatwa_common::models::FatwaDetail;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

/// Messages that update the detail component.
#[derive(Debug, Clone)]
pub enum DetailMessage {
    /// A full record was fetched.
    Loaded(FatwaDetail),
    /// Scroll the body up by the given number of lines.
    ScrollUp(u16),
    /// Scroll the body down by the given number of lines.
    ScrollDown(u16),
    /// Drop the comment draft after a successful submission.
    ClearComment,
}

/// Detail panel over the currently opened record.
pub struct DetailComponent {
    detail: Option<FatwaDetail>,
    scroll: u16,
    comment: TextArea<'static>,
}

impl Default for DetailComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailComponent {
    /// Create an empty detail panel.
    pub fn new() -> Self {
        Self {
            detail: None,
            scroll: 0,
            comment: new_comment_area(),
        }
    }

    /// Update component state with a message.
    pub fn update(&mut self, message: DetailMessage) {
        match message {
            DetailMessage::Loaded(detail) => {
                // A refresh of the same record keeps the reading position.
                if self.current_id() != Some(detail.id) {
                    self.scroll = 0;
                }
                self.detail = Some(detail);
            }
            DetailMessage::ScrollUp(step) => {
                self.scroll = self.scroll.saturating_sub(step);
            }
            DetailMessage::ScrollDown(step) => {
                self.scroll = self.scroll.saturating_add(step);
            }
            DetailMessage::ClearComment => {
                self.comment = new_comment_area();
            }
        }
    }

    /// Id of the record currently shown, if any.
    pub fn current_id(&self) -> Option<i64> {
        self.detail.as_ref().map(|d| d.id)
    }

    /// The comment draft as typed, untrimmed.
    pub fn comment_text(&self) -> String {
        self.comment.lines().join("\n")
    }

    /// Forward a key event to the comment input.
    pub fn input_comment(&mut self, key: KeyEvent) {
        self.comment.input(key);
    }

    /// Body lines in render order. Kept separate from `render` so the
    /// section layout can be asserted without a terminal.
    pub fn body_lines(&self) -> Vec<Line<'_>> {
        let Some(detail) = &self.detail else {
            return vec![Line::from(Span::styled(
                "Select a record to view it",
                Style::default().fg(Color::DarkGray),
            ))];
        };

        let heading = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let meta = Style::default().fg(Color::DarkGray);

        let mut lines = vec![
            Line::from(Span::styled(
                detail.display_title().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "{} | {} | {}",
                    detail.topic,
                    detail.display_madhhab(),
                    detail.url.as_deref().unwrap_or("no source"),
                ),
                meta,
            )),
            Line::from(""),
            Line::from(Span::styled("Question Summary", heading)),
        ];
        push_text(&mut lines, detail.question_summary.as_deref());

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Draft Fatwa", heading)));
        push_text(&mut lines, detail.draft_fatwa_text.as_deref());

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Quran References", heading)));
        lines.push(Line::from(detail.quran_references().join(", ")));

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Feedback ({})", detail.feedback.len()),
            heading,
        )));
        for entry in &detail.feedback {
            lines.push(Line::from(format!("- {}", entry.comment)));
        }

        lines
    }

    /// Render the detail body and the comment input.
    pub fn render(&mut self, f: &mut Frame, area: Rect, comment_focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(4)])
            .split(area);

        let body_border = if comment_focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let body = Paragraph::new(self.body_lines())
            .block(
                Block::default()
                    .title(" Detail ")
                    .borders(Borders::ALL)
                    .border_style(body_border),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        f.render_widget(body, chunks[0]);

        let comment_border = if comment_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        self.comment.set_block(
            Block::default()
                .title(" Add Feedback (Enter to submit) ")
                .borders(Borders::ALL)
                .border_style(comment_border),
        );
        f.render_widget(&self.comment, chunks[1]);
    }
}

fn new_comment_area() -> TextArea<'static> {
    let mut area = TextArea::default();
    area.set_placeholder_text("Refinement note...");
    area
}

fn push_text(lines: &mut Vec<Line<'_>>, text: Option<&str>) {
    match text {
        Some(text) if !text.is_empty() => {
            for part in text.lines() {
                lines.push(Line::from(part.to_string()));
            }
        }
        _ => lines.push(Line::from("")),
    }
}
