//! Fatwa list component
//!
//! Holds the current page of summary records and the selection cursor.
//! Pure rendering and selection state; fetching happens in the app loop.

use fatwa_common::models::FatwaSummary;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Messages that update the list component.
#[derive(Debug, Clone)]
pub enum ListMessage {
    /// A fresh page of results replaces the current one wholesale.
    ItemsLoaded(Vec<FatwaSummary>),
    /// Move the selection up.
    SelectPrevious,
    /// Move the selection down.
    SelectNext,
}

/// List widget over the current summary records.
#[derive(Debug, Default)]
pub struct FatwaListComponent {
    items: Vec<FatwaSummary>,
    state: ListState,
}

impl FatwaListComponent {
    /// Create an empty list component.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update component state with a message.
    pub fn update(&mut self, message: ListMessage) {
        match message {
            ListMessage::ItemsLoaded(items) => {
                self.items = items;
                self.state = ListState::default();
                if !self.items.is_empty() {
                    self.state.select(Some(0));
                }
            }
            ListMessage::SelectPrevious => {
                if let Some(selected) = self.state.selected() {
                    self.state.select(Some(selected.saturating_sub(1)));
                }
            }
            ListMessage::SelectNext => {
                if let Some(selected) = self.state.selected() {
                    if selected + 1 < self.items.len() {
                        self.state.select(Some(selected + 1));
                    }
                }
            }
        }
    }

    /// The currently selected record, if any.
    pub fn selected(&self) -> Option<&FatwaSummary> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// One list entry per record: title (or placeholder) on the first line,
    /// `topic | #id` on the meta line.
    fn list_items(&self) -> Vec<ListItem<'_>> {
        list_items(&self.items)
    }

    /// Render the list widget.
    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };

        let title = format!(" Fatawa ({}) ", self.items.len());
        let list = List::new(list_items(&self.items))
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .highlight_style(Style::default().bg(Color::DarkGray));

        f.render_stateful_widget(list, area, &mut self.state);
    }
}

fn list_items(items: &[FatwaSummary]) -> Vec<ListItem<'_>> {
    items
        .iter()
        .map(|item| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    item.display_title(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    item.meta_line(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64, title: Option<&str>, topic: &str) -> FatwaSummary {
        FatwaSummary {
            id,
            title: title.map(str::to_string),
            topic: topic.to_string(),
            url: None,
            question_summary: None,
        }
    }

    #[test]
    fn test_items_loaded_produces_one_entry_per_record() {
        let mut list = FatwaListComponent::new();
        list.update(ListMessage::ItemsLoaded(vec![
            summary(1, Some("Breaking the fast"), "fasting"),
            summary(2, None, "zakat"),
            summary(3, Some("Travel prayer"), "prayer"),
        ]));

        assert_eq!(list.list_items().len(), 3);
        assert_eq!(list.len(), 3);
        assert_eq!(list.selected().map(|s| s.id), Some(1));
    }

    #[test]
    fn test_untitled_entry_uses_placeholder() {
        let item = summary(9, None, "fasting");
        assert_eq!(item.display_title(), "(untitled)");
        assert_eq!(item.meta_line(), "fasting | #9");
    }

    #[test]
    fn test_selection_clamps_at_both_ends() {
        let mut list = FatwaListComponent::new();
        list.update(ListMessage::ItemsLoaded(vec![
            summary(1, None, "a"),
            summary(2, None, "b"),
        ]));

        list.update(ListMessage::SelectPrevious);
        assert_eq!(list.selected().map(|s| s.id), Some(1));

        list.update(ListMessage::SelectNext);
        list.update(ListMessage::SelectNext);
        assert_eq!(list.selected().map(|s| s.id), Some(2));
    }

    #[test]
    fn test_reload_replaces_items_and_resets_selection() {
        let mut list = FatwaListComponent::new();
        list.update(ListMessage::ItemsLoaded(vec![
            summary(1, None, "a"),
            summary(2, None, "b"),
        ]));
        list.update(ListMessage::SelectNext);

        list.update(ListMessage::ItemsLoaded(vec![summary(7, None, "c")]));
        assert_eq!(list.len(), 1);
        assert_eq!(list.selected().map(|s| s.id), Some(7));
    }

    #[test]
    fn test_empty_page_has_no_selection() {
        let mut list = FatwaListComponent::new();
        list.update(ListMessage::ItemsLoaded(Vec::new()));
        assert!(list.is_empty());
        assert!(list.selected().is_none());
    }
}
