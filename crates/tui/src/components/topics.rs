//! Topic filter component
//!
//! Loaded once at startup. Entry 0 is the "All topics" sentinel; the rest
//! are one entry per aggregate, labeled `topic (count)`.

use fatwa_common::models::TopicCount;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Label of the sentinel entry that clears the filter.
pub const ALL_TOPICS: &str = "All topics";

/// Messages that update the topic filter.
#[derive(Debug, Clone)]
pub enum TopicsMessage {
    /// Aggregates fetched from the server.
    TopicsLoaded(Vec<TopicCount>),
    /// Move the selection to the next entry, wrapping around.
    CycleNext,
    /// Move the selection to the previous entry, wrapping around.
    CyclePrevious,
}

/// Selection control over the topic aggregates.
#[derive(Debug, Default)]
pub struct TopicFilterComponent {
    topics: Vec<TopicCount>,
    /// 0 is the sentinel; topic i lives at index i + 1.
    selected: usize,
}

impl TopicFilterComponent {
    /// Create an empty filter with only the sentinel entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update component state with a message.
    pub fn update(&mut self, message: TopicsMessage) {
        match message {
            TopicsMessage::TopicsLoaded(topics) => {
                self.topics = topics;
                self.selected = 0;
            }
            TopicsMessage::CycleNext => {
                self.selected = (self.selected + 1) % self.entry_count();
            }
            TopicsMessage::CyclePrevious => {
                self.selected = (self.selected + self.entry_count() - 1) % self.entry_count();
            }
        }
    }

    /// The selected topic name, or `None` for the sentinel.
    pub fn selected_topic(&self) -> Option<&str> {
        if self.selected == 0 {
            None
        } else {
            self.topics.get(self.selected - 1).map(|t| t.topic.as_str())
        }
    }

    /// Labels for every entry, sentinel first.
    pub fn labels(&self) -> Vec<String> {
        std::iter::once(ALL_TOPICS.to_string())
            .chain(self.topics.iter().map(TopicCount::display_label))
            .collect()
    }

    /// Label of the selected entry.
    pub fn selected_label(&self) -> String {
        if self.selected == 0 {
            ALL_TOPICS.to_string()
        } else {
            self.topics[self.selected - 1].display_label()
        }
    }

    fn entry_count(&self) -> usize {
        self.topics.len() + 1
    }

    /// Render the filter as a single bar showing the current selection.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" Topic: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.selected_label(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  [{}/{}]  t/T to cycle", self.selected + 1, self.entry_count()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        f.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(name: &str, count: u64) -> TopicCount {
        TopicCount {
            topic: name.to_string(),
            count,
        }
    }

    #[test]
    fn test_labels_include_sentinel_and_counts() {
        let mut filter = TopicFilterComponent::new();
        filter.update(TopicsMessage::TopicsLoaded(vec![topic("fasting", 3)]));

        assert_eq!(filter.labels(), vec!["All topics", "fasting (3)"]);
        assert_eq!(filter.selected_topic(), None);
    }

    #[test]
    fn test_cycle_selects_topic_then_wraps() {
        let mut filter = TopicFilterComponent::new();
        filter.update(TopicsMessage::TopicsLoaded(vec![
            topic("fasting", 3),
            topic("zakat", 1),
        ]));

        filter.update(TopicsMessage::CycleNext);
        assert_eq!(filter.selected_topic(), Some("fasting"));

        filter.update(TopicsMessage::CycleNext);
        assert_eq!(filter.selected_topic(), Some("zakat"));

        filter.update(TopicsMessage::CycleNext);
        assert_eq!(filter.selected_topic(), None);
    }

    #[test]
    fn test_cycle_previous_wraps_backwards() {
        let mut filter = TopicFilterComponent::new();
        filter.update(TopicsMessage::TopicsLoaded(vec![topic("fasting", 3)]));

        filter.update(TopicsMessage::CyclePrevious);
        assert_eq!(filter.selected_topic(), Some("fasting"));
        assert_eq!(filter.selected_label(), "fasting (3)");
    }

    #[test]
    fn test_reload_resets_selection_to_sentinel() {
        let mut filter = TopicFilterComponent::new();
        filter.update(TopicsMessage::TopicsLoaded(vec![topic("fasting", 3)]));
        filter.update(TopicsMessage::CycleNext);

        filter.update(TopicsMessage::TopicsLoaded(vec![topic("prayer", 8)]));
        assert_eq!(filter.selected_topic(), None);
        assert_eq!(filter.selected_label(), ALL_TOPICS);
    }
}
