//! Main application component
//!
//! Message-driven app loop: terminal events and async fetch completions
//! are folded into one update function. Every fetch runs on a spawned task
//! and reports back through the internal channel, so the UI thread never
//! blocks on network I/O. Overlapping fetches are not serialized or
//! de-duplicated; completions fully overwrite component state, so a race
//! shows the last response to arrive, never a corrupted view.

use crate::{
    components::{
        DetailComponent, DetailMessage, FatwaListComponent, ListMessage, StatusLine,
        StatusMessage, TopicFilterComponent, TopicsMessage,
    },
    client::FatwaClient,
    services::ApiService,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use fatwa_common::{
    models::{FatwaDetail, FatwaSummary, ListQuery, TopicCount},
    Config, Error, Result,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::{
    io::{self, stdout},
    sync::Arc,
    time::Duration,
};
use tracing::{debug, error, info, instrument};
use tui_textarea::TextArea;

/// Which pane owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The summary list.
    List,
    /// The search text field.
    Search,
    /// The detail body.
    Detail,
    /// The feedback comment field.
    Comment,
}

/// Main application state and event loop.
pub struct App {
    config: Config,
    api: ApiService,
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    topics: TopicFilterComponent,
    list: FatwaListComponent,
    detail: DetailComponent,
    status_line: StatusLine,
    search_input: TextArea<'static>,
    focus: Focus,
    running: bool,
    show_help: bool,
    internal_sender: tokio::sync::mpsc::UnboundedSender<AppMessage>,
    internal_receiver: tokio::sync::mpsc::UnboundedReceiver<AppMessage>,
}

/// Application messages.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Keyboard input
    KeyPress(KeyEvent),

    /// Terminal resize
    Resize(u16, u16),

    /// Fetch the topic aggregates (startup trigger)
    ReloadTopics,

    /// Fetch the list using the current filter and search state
    ReloadList,

    /// Fetch the full record for one id
    OpenDetail(i64),

    /// Post a comment, then refresh the record it belongs to
    SubmitFeedback {
        /// Record the comment belongs to
        fatwa_id: i64,
        /// Trimmed comment text
        comment: String,
    },

    /// Topic aggregates arrived
    TopicsLoaded(Vec<TopicCount>),

    /// A list page arrived
    ListLoaded(Vec<FatwaSummary>),

    /// A full record arrived
    DetailLoaded(FatwaDetail),

    /// A feedback POST succeeded and the refreshed record arrived
    FeedbackPosted(FatwaDetail),

    /// A request failed; the message is already user-readable
    RequestFailed(String),

    /// Quit application
    Quit,
}

impl App {
    /// Create new application instance and kick off the startup fetches.
    #[instrument(skip(config))]
    pub async fn new(config: Config) -> Result<Self> {
        info!("Initializing fatwa TUI");

        enable_raw_mode().map_err(Error::Io)?;
        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).map_err(Error::Io)?;

        let client = Arc::new(FatwaClient::new(&config.server_url));
        let api = ApiService::new(client);

        let (internal_sender, internal_receiver) = tokio::sync::mpsc::unbounded_channel();

        let mut search_input = TextArea::default();
        search_input.set_placeholder_text("Search...");

        let mut app = Self {
            config,
            api,
            terminal,
            topics: TopicFilterComponent::new(),
            list: FatwaListComponent::new(),
            detail: DetailComponent::new(),
            status_line: StatusLine::new(),
            search_input,
            focus: Focus::List,
            running: true,
            show_help: false,
            internal_sender,
            internal_receiver,
        };

        // Topics load once at startup; the first list query follows in the
        // TopicsLoaded handler.
        app.update(AppMessage::ReloadTopics)?;

        Ok(app)
    }

    /// Run the main application loop.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting application event loop");

        loop {
            if !self.running {
                break;
            }

            if let Some(msg) = self.handle_terminal_events()? {
                self.update(msg)?;
            }

            if let Some(msg) = self.handle_internal_messages() {
                self.update(msg)?;
            }

            self.render()?;

            tokio::time::sleep(Duration::from_millis(16)).await;
        }

        info!("Application loop ended");
        Ok(())
    }

    fn handle_terminal_events(&self) -> Result<Option<AppMessage>> {
        if event::poll(Duration::from_millis(10)).map_err(Error::Io)? {
            match event::read().map_err(Error::Io)? {
                Event::Key(key_event) => return Ok(Some(AppMessage::KeyPress(key_event))),
                Event::Resize(width, height) => {
                    return Ok(Some(AppMessage::Resize(width, height)))
                }
                _ => {}
            }
        }
        Ok(None)
    }

    fn handle_internal_messages(&mut self) -> Option<AppMessage> {
        self.internal_receiver.try_recv().ok()
    }

    /// Update application state with a message.
    fn update(&mut self, message: AppMessage) -> Result<()> {
        match message {
            AppMessage::KeyPress(key_event) => {
                self.handle_key_event(key_event)?;
            }

            AppMessage::Resize(width, height) => {
                debug!("Terminal resized to {}x{}", width, height);
                self.terminal
                    .resize(Rect::new(0, 0, width, height))
                    .map_err(Error::Io)?;
            }

            AppMessage::ReloadTopics => {
                self.status_line
                    .set_message(StatusMessage::info("Loading topics..."));
                let api = self.api.clone();
                let sender = self.internal_sender.clone();
                tokio::spawn(async move {
                    match api.topics().await {
                        Ok(topics) => {
                            let _ = sender.send(AppMessage::TopicsLoaded(topics));
                        }
                        Err(e) => {
                            error!("Topic fetch failed: {}", e);
                            let _ = sender.send(AppMessage::RequestFailed(e.user_message()));
                        }
                    }
                });
            }

            AppMessage::TopicsLoaded(topics) => {
                info!(count = topics.len(), "Topics loaded");
                self.topics.update(TopicsMessage::TopicsLoaded(topics));
                self.update(AppMessage::ReloadList)?;
            }

            AppMessage::ReloadList => {
                // The query is re-derived from current control state on
                // every trigger; nothing is carried between list fetches.
                let query = ListQuery::new(
                    self.topics.selected_topic(),
                    &self.search_text(),
                    self.config.ui.list_limit,
                );
                debug!(?query, "Reloading list");

                let api = self.api.clone();
                let sender = self.internal_sender.clone();
                tokio::spawn(async move {
                    match api.list_fatawa(&query).await {
                        Ok(items) => {
                            let _ = sender.send(AppMessage::ListLoaded(items));
                        }
                        Err(e) => {
                            error!("List fetch failed: {}", e);
                            let _ = sender.send(AppMessage::RequestFailed(e.user_message()));
                        }
                    }
                });
            }

            AppMessage::ListLoaded(items) => {
                self.status_line
                    .set_message(StatusMessage::info(format!("{} records", items.len())));
                self.list.update(ListMessage::ItemsLoaded(items));
            }

            AppMessage::OpenDetail(id) => {
                let api = self.api.clone();
                let sender = self.internal_sender.clone();
                tokio::spawn(async move {
                    match api.get_fatwa(id).await {
                        Ok(detail) => {
                            let _ = sender.send(AppMessage::DetailLoaded(detail));
                        }
                        Err(e) => {
                            error!("Detail fetch failed: {}", e);
                            let _ = sender.send(AppMessage::RequestFailed(e.user_message()));
                        }
                    }
                });
            }

            AppMessage::DetailLoaded(detail) => {
                self.detail.update(DetailMessage::Loaded(detail));
                if self.focus == Focus::List {
                    self.focus = Focus::Detail;
                }
            }

            AppMessage::SubmitFeedback { fatwa_id, comment } => {
                self.status_line
                    .set_message(StatusMessage::info("Submitting feedback..."));
                let api = self.api.clone();
                let sender = self.internal_sender.clone();
                tokio::spawn(async move {
                    match api.submit_and_refresh(fatwa_id, &comment).await {
                        Ok(Some(detail)) => {
                            let _ = sender.send(AppMessage::FeedbackPosted(detail));
                        }
                        Ok(None) => {}
                        Err(e) => {
                            error!("Feedback submission failed: {}", e);
                            let _ = sender.send(AppMessage::RequestFailed(e.user_message()));
                        }
                    }
                });
            }

            AppMessage::FeedbackPosted(detail) => {
                self.detail.update(DetailMessage::ClearComment);
                self.detail.update(DetailMessage::Loaded(detail));
                self.focus = Focus::Detail;
                self.status_line
                    .set_message(StatusMessage::info("Feedback submitted"));
            }

            AppMessage::RequestFailed(message) => {
                self.status_line.set_message(StatusMessage::error(message));
            }

            AppMessage::Quit => {
                self.running = false;
            }
        }

        Ok(())
    }

    fn search_text(&self) -> String {
        self.search_input.lines().join(" ")
    }

    /// Handle keyboard events, dispatched by focus.
    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if self.show_help {
            // In help mode, any key closes help
            self.show_help = false;
            return Ok(());
        }

        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.running = false;
            return Ok(());
        }

        match self.focus {
            Focus::List => self.handle_list_key(key_event)?,
            Focus::Search => self.handle_search_key(key_event)?,
            Focus::Detail => self.handle_detail_key(key_event)?,
            Focus::Comment => self.handle_comment_key(key_event)?,
        }

        Ok(())
    }

    fn handle_list_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') | KeyCode::F(1) => self.show_help = true,
            KeyCode::Char('r') => self.update(AppMessage::ReloadList)?,
            KeyCode::Char('t') => {
                self.topics.update(TopicsMessage::CycleNext);
                self.update(AppMessage::ReloadList)?;
            }
            KeyCode::Char('T') => {
                self.topics.update(TopicsMessage::CyclePrevious);
                self.update(AppMessage::ReloadList)?;
            }
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Up => self.list.update(ListMessage::SelectPrevious),
            KeyCode::Down => self.list.update(ListMessage::SelectNext),
            KeyCode::Enter => {
                if let Some(item) = self.list.selected() {
                    let id = item.id;
                    self.update(AppMessage::OpenDetail(id))?;
                }
            }
            KeyCode::Tab => {
                if self.detail.current_id().is_some() {
                    self.focus = Focus::Detail;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.code {
            KeyCode::Enter => {
                self.focus = Focus::List;
                self.update(AppMessage::ReloadList)?;
            }
            KeyCode::Esc => self.focus = Focus::List,
            _ => {
                self.search_input.input(key_event);
            }
        }
        Ok(())
    }

    fn handle_detail_key(&mut self, key_event: KeyEvent) -> Result<()> {
        let step = self.config.ui.detail_scroll_step;
        match key_event.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') | KeyCode::F(1) => self.show_help = true,
            KeyCode::Esc | KeyCode::Tab => self.focus = Focus::List,
            KeyCode::Up => self.detail.update(DetailMessage::ScrollUp(step)),
            KeyCode::Down => self.detail.update(DetailMessage::ScrollDown(step)),
            KeyCode::PageUp => self.detail.update(DetailMessage::ScrollUp(step * 10)),
            KeyCode::PageDown => self.detail.update(DetailMessage::ScrollDown(step * 10)),
            KeyCode::Char('c') => self.focus = Focus::Comment,
            KeyCode::Char('r') => {
                if let Some(id) = self.detail.current_id() {
                    self.update(AppMessage::OpenDetail(id))?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_comment_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event {
            KeyEvent {
                code: KeyCode::Esc, ..
            } => self.focus = Focus::Detail,

            KeyEvent {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::NONE,
                ..
            } => {
                // An empty or whitespace-only draft is a silent no-op.
                let comment = self.detail.comment_text().trim().to_string();
                if comment.is_empty() {
                    return Ok(());
                }
                if let Some(fatwa_id) = self.detail.current_id() {
                    self.update(AppMessage::SubmitFeedback { fatwa_id, comment })?;
                }
            }

            KeyEvent {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::SHIFT,
                ..
            } => {
                self.detail
                    .input_comment(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
            }

            key_event => self.detail.input_comment(key_event),
        }
        Ok(())
    }

    /// Render the application UI.
    fn render(&mut self) -> Result<()> {
        let Self {
            terminal,
            topics,
            list,
            detail,
            status_line,
            search_input,
            focus,
            show_help,
            ..
        } = self;
        let focus = *focus;
        let show_help = *show_help;

        terminal
            .draw(|frame| {
                render_frame(
                    frame,
                    topics,
                    list,
                    detail,
                    status_line,
                    search_input,
                    focus,
                    show_help,
                );
            })
            .map_err(Error::Io)?;

        Ok(())
    }
}

fn render_frame(
    frame: &mut Frame,
    topics: &TopicFilterComponent,
    list: &mut FatwaListComponent,
    detail: &mut DetailComponent,
    status_line: &StatusLine,
    search_input: &mut TextArea,
    focus: Focus,
    show_help: bool,
) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // topic bar
            Constraint::Min(5),    // list + detail
            Constraint::Length(3), // search input
            Constraint::Length(1), // status line
        ])
        .split(area);

    topics.render(frame, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    list.render(frame, main[0], focus == Focus::List);
    detail.render(frame, main[1], focus == Focus::Comment);

    let search_border = if focus == Focus::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    search_input.set_block(
        Block::default()
            .title(" Search (Enter to run) ")
            .borders(Borders::ALL)
            .border_style(search_border),
    );
    frame.render_widget(&*search_input, chunks[2]);

    status_line.render(frame, chunks[3]);

    if show_help {
        render_help(frame, area);
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    let popup_area = Rect {
        x: area.width / 4,
        y: area.height / 4,
        width: area.width / 2,
        height: area.height / 2,
    };

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(""),
        Line::from(" Fatwa Browser Help "),
        Line::from(""),
        Line::from(" ↑/↓: Navigate list or scroll detail"),
        Line::from(" Enter: Open selected record"),
        Line::from(" t/T: Cycle topic filter"),
        Line::from(" /: Focus search, Enter to run"),
        Line::from(" r: Reload"),
        Line::from(" c: Write feedback, Enter to submit"),
        Line::from(" Tab/Esc: Switch between list and detail"),
        Line::from(" q: Quit application"),
        Line::from(""),
        Line::from(" Press any key to close"),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(help, popup_area);
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_message_exists() {
        let msg = AppMessage::Quit;
        assert!(matches!(msg, AppMessage::Quit));
    }

    #[test]
    fn test_focus_is_copy() {
        let focus = Focus::List;
        let copy = focus;
        assert_eq!(focus, copy);
    }
}
