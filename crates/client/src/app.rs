//! Application state and event loop for the terminal client.

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::widgets::TableState;

use warboard_api::RosterService;
use warboard_core::CharacterIdentity;

use crate::terminal::Tui;
use crate::ui;

/// Top-level input mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Navigating the ranked table.
    Browse,
    /// Editing the add-character fields.
    Insert,
}

/// Which add-character field has focus in Insert mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Server,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Single-line status surfaced above the footer.
#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusMessage {
    fn info(text: String) -> Self {
        Self {
            text,
            level: StatusLevel::Info,
        }
    }

    fn warning(text: String) -> Self {
        Self {
            text,
            level: StatusLevel::Warning,
        }
    }

    fn error(text: String) -> Self {
        Self {
            text,
            level: StatusLevel::Error,
        }
    }
}

/// A deferred operation that needs the network; executed by the event
/// loop with a busy frame drawn first so the UI never looks frozen.
enum Command {
    Add { name: String, server: String },
    Remove { key: String },
    Refresh { key: String },
}

pub struct App {
    service: RosterService,
    pub mode: Mode,
    pub name_input: String,
    pub server_input: String,
    pub focus: Field,
    pub table_state: TableState,
    pub status: Option<StatusMessage>,
    /// Message shown while an async operation is in flight.
    pub busy: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(service: RosterService) -> Self {
        Self {
            service,
            mode: Mode::Browse,
            name_input: String::new(),
            server_input: String::new(),
            focus: Field::Name,
            table_state: TableState::default(),
            status: None,
            busy: None,
            should_quit: false,
        }
    }

    pub fn service(&self) -> &RosterService {
        &self.service
    }

    /// Seed the roster and run the event loop until quit.
    ///
    /// An unreadable seed list degrades to an empty roster with a
    /// visible error, not a startup failure.
    pub async fn run(
        mut self,
        terminal: &mut Tui,
        seed: std::io::Result<Vec<CharacterIdentity>>,
    ) -> Result<()> {
        self.busy = Some("Loading tracked characters...".to_string());
        self.draw(terminal)?;

        match seed {
            Ok(identities) => {
                let report = self.service.load(identities).await;
                self.status = if report.failures.is_empty() {
                    Some(StatusMessage::info(format!(
                        "Loaded {} tracked characters",
                        report.loaded
                    )))
                } else {
                    Some(StatusMessage::warning(format!(
                        "Loaded {} characters, {} failed (see log)",
                        report.loaded,
                        report.failures.len()
                    )))
                };
            }
            Err(e) => {
                tracing::error!("Seed list unreadable: {}", e);
                self.status = Some(StatusMessage::error(format!(
                    "Could not read seed list: {} - starting with an empty roster",
                    e
                )));
            }
        }
        self.busy = None;
        self.clamp_selection();

        let mut events = EventStream::new();
        loop {
            self.draw(terminal)?;

            let Some(event) = events.next().await else {
                break;
            };
            if let Event::Key(key) = event? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = self.handle_key(key) {
                    self.execute(command, terminal).await?;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Tui) -> Result<()> {
        terminal.draw(|frame| ui::render(frame, self))?;
        Ok(())
    }

    async fn execute(&mut self, command: Command, terminal: &mut Tui) -> Result<()> {
        match command {
            Command::Add { name, server } => {
                self.busy = Some(format!("Adding {}...", name));
                self.draw(terminal)?;
                self.add(&name, &server).await;
            }
            Command::Remove { key } => {
                if self.service.remove(&key) {
                    self.status = Some(StatusMessage::info(format!("Removed {}", key)));
                }
            }
            Command::Refresh { key } => {
                self.busy = Some(format!("Refreshing {}...", key));
                self.draw(terminal)?;
                self.refresh(&key).await;
            }
        }
        self.busy = None;
        self.clamp_selection();
        Ok(())
    }

    async fn add(&mut self, name: &str, server: &str) {
        match self.service.add(name, server).await {
            Ok(true) => {
                self.status = Some(StatusMessage::info(format!("Added {} on {}", name, server)));
                self.name_input.clear();
                self.server_input.clear();
                self.focus = Field::Name;
                self.mode = Mode::Browse;
            }
            Ok(false) => {
                self.status = Some(StatusMessage::warning(format!(
                    "Already tracking {} on {}",
                    name, server
                )));
            }
            Err(e) if e.is_not_found() => {
                self.status = Some(StatusMessage::error(format!(
                    "Could not find {} on {}",
                    name, server
                )));
            }
            Err(e) => {
                self.status = Some(StatusMessage::error(format!("Failed to add {}: {}", name, e)));
            }
        }
    }

    async fn refresh(&mut self, key: &str) {
        match self.service.refresh(key).await {
            Ok(true) => {
                self.status = Some(StatusMessage::info(format!("Refreshed {}", key)));
            }
            Ok(false) => {}
            Err(e) => {
                self.status = Some(StatusMessage::error(format!(
                    "Refresh failed for {}: {} - keeping last known data",
                    key, e
                )));
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Insert => self.handle_insert_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('a') | KeyCode::Char('i') => {
                self.mode = Mode::Insert;
                self.focus = Field::Name;
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('d') => self
                .selected_key()
                .map(|key| Command::Remove { key }),
            KeyCode::Char('r') => self
                .selected_key()
                .map(|key| Command::Refresh { key }),
            _ => None,
        }
    }

    fn handle_insert_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                None
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Field::Name => Field::Server,
                    Field::Server => Field::Name,
                };
                None
            }
            KeyCode::Backspace => {
                self.focused_input().pop();
                None
            }
            KeyCode::Char(c) => {
                self.focused_input().push(c);
                None
            }
            KeyCode::Enter => {
                let name = self.name_input.trim().to_string();
                let server = self.server_input.trim().to_string();
                if name.is_empty() || server.is_empty() {
                    self.status = Some(StatusMessage::warning(
                        "Enter both a character name and a server".to_string(),
                    ));
                    return None;
                }
                Some(Command::Add { name, server })
            }
            _ => None,
        }
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.name_input,
            Field::Server => &mut self.server_input,
        }
    }

    fn move_selection(&mut self, delta: i32) {
        let len = self.service.len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as i32;
        let next = (current + delta).clamp(0, len as i32 - 1) as usize;
        self.table_state.select(Some(next));
    }

    /// Keep the selection inside the roster after mutations.
    fn clamp_selection(&mut self) {
        let len = self.service.len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            let selected = self.table_state.selected().unwrap_or(0).min(len - 1);
            self.table_state.select(Some(selected));
        }
    }

    /// Roster key of the currently selected row, in ranking order.
    fn selected_key(&self) -> Option<String> {
        let selected = self.table_state.selected()?;
        self.service
            .ranked_view()
            .get(selected)
            .map(|snapshot| snapshot.key())
    }
}
