//! Application struct and event loop.
//!
//! Owns the terminal, state, gateway, and completion channels. All engine
//! mutation happens here on the UI task; network calls run on spawned tasks
//! and report back through the channels.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::chat::QueryTicket;
use crate::config::Config;
use crate::constants::*;
use crate::gateway::{AskResponse, EnrichResponse, Outcome, RequestGateway, StatsResponse};
use crate::intel::LookupTicket;
use crate::session::SessionStore;
use crate::ui::{self, AppState, Screen};

/// Completion of a dispatched investigation query.
struct QueryCompletion {
    seq: u64,
    outcome: Outcome<AskResponse>,
}

/// Completion of a dispatched IP lookup.
struct LookupCompletion {
    seq: u64,
    outcome: Outcome<EnrichResponse>,
}

/// Main application struct.
///
/// Owns all runtime resources: terminal, state, gateway, channels.
pub struct App {
    state: AppState,
    gateway: RequestGateway,

    // Channels
    query_tx: mpsc::UnboundedSender<QueryCompletion>,
    query_rx: mpsc::UnboundedReceiver<QueryCompletion>,
    lookup_tx: mpsc::UnboundedSender<LookupCompletion>,
    lookup_rx: mpsc::UnboundedReceiver<LookupCompletion>,
    stats_tx: mpsc::UnboundedSender<Outcome<StatsResponse>>,
    stats_rx: mpsc::UnboundedReceiver<Outcome<StatsResponse>>,
}

impl App {
    /// Create a new App, initializing all subsystems.
    ///
    /// Restores the persisted session before the first frame: gated screens
    /// must never render while the session is still loading.
    pub fn new(config: &Config) -> Result<Self> {
        let gateway = RequestGateway::new(config)?;

        // Resolve theme
        let initial_theme = ui::Theme::by_name(&config.theme)
            .or_else(|| ui::Theme::from_toml_file(&custom_theme_path(&config.theme)))
            .unwrap_or_default();

        let mut session = SessionStore::open_default();
        session.restore();

        let state = AppState::new(session, initial_theme, config.dashboard_url.clone());

        let (query_tx, query_rx) = mpsc::unbounded_channel();
        let (lookup_tx, lookup_rx) = mpsc::unbounded_channel();
        let (stats_tx, stats_rx) = mpsc::unbounded_channel();

        Ok(Self {
            state,
            gateway,
            query_tx,
            query_rx,
            lookup_tx,
            lookup_rx,
            stats_tx,
            stats_rx,
        })
    }

    /// Run the main event loop. Returns when the user quits.
    pub async fn run(&mut self) -> Result<()> {
        // Terminal init
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        loop {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            self.drain_query_completions();
            self.drain_lookup_completions();
            self.drain_stats();

            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_key(key) {
                        break; // quit requested
                    }
                }
            }

            self.state.tick_count = self.state.tick_count.wrapping_add(1);
        }

        // Cleanup
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        println!("\n{}\n", t!("app.stopped"));
        Ok(())
    }

    // ── Channel draining ─────────────────────────────────────────

    fn drain_query_completions(&mut self) {
        while let Ok(completion) = self.query_rx.try_recv() {
            self.state
                .conversation
                .complete(completion.seq, completion.outcome);
        }
    }

    fn drain_lookup_completions(&mut self) {
        while let Ok(completion) = self.lookup_rx.try_recv() {
            self.state.intel.complete(completion.seq, completion.outcome);
        }
    }

    fn drain_stats(&mut self) {
        while let Ok(outcome) = self.stats_rx.try_recv() {
            self.state.intel.apply_stats(outcome);
        }
    }

    // ── Dispatch ─────────────────────────────────────────────────

    /// Run an accepted investigation query on a background task.
    fn dispatch_query(&self, ticket: QueryTicket) {
        let gateway = self.gateway.clone();
        let tx = self.query_tx.clone();
        tokio::spawn(async move {
            let outcome = gateway.ask(&ticket.prompt).await;
            let _ = tx.send(QueryCompletion {
                seq: ticket.seq,
                outcome,
            });
        });
    }

    /// Run an accepted IP lookup on a background task.
    fn dispatch_lookup(&self, ticket: LookupTicket) {
        let gateway = self.gateway.clone();
        let tx = self.lookup_tx.clone();
        tokio::spawn(async move {
            let outcome = gateway.enrich_ip(&ticket.address).await;
            let _ = tx.send(LookupCompletion {
                seq: ticket.seq,
                outcome,
            });
        });
    }

    /// Fetch the aggregate indicator count (best-effort, once per session).
    fn dispatch_stats(&self) {
        let gateway = self.gateway.clone();
        let tx = self.stats_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(gateway.stats().await);
        });
    }

    // ── Keyboard handling ────────────────────────────────────────

    /// Handle a key event. Returns `true` if the app should quit.
    fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> bool {
        // Ctrl+Q: quit from any mode, including the sign-in card
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Everything is gated on the session
        if !self.state.session.is_authenticated() {
            return self.handle_key_login(key);
        }

        // Ctrl+O: sign out from any authenticated mode
        if key.code == KeyCode::Char('o') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.sign_out();
            return false;
        }

        // Typing modes
        if self.state.chat_typing {
            return self.handle_key_chat_typing(key);
        }
        if self.state.intel_typing {
            return self.handle_key_intel_typing(key);
        }

        // Normal mode
        self.handle_key_normal(key)
    }

    fn handle_key_login(&mut self, key: crossterm::event::KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.state.toggle_login_focus();
            }
            KeyCode::Enter => {
                self.submit_login();
            }
            KeyCode::Backspace => {
                self.state.focused_login_field().backspace();
            }
            KeyCode::Left => {
                self.state.focused_login_field().cursor_left();
            }
            KeyCode::Right => {
                self.state.focused_login_field().cursor_right();
            }
            KeyCode::Esc => {
                self.state.login_identifier.clear();
                self.state.login_secret.clear();
                self.state.login_error = None;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.focused_login_field().insert_char(c);
            }
            _ => {}
        }
        false
    }

    /// Check the entered credentials and resolve the sign-in attempt either
    /// way: success lands on the overview, failure re-prompts inline.
    fn submit_login(&mut self) {
        let identifier = self.state.login_identifier.value().trim().to_string();
        let secret = self.state.login_secret.value().to_string();

        if self.state.session.login(&identifier, &secret) {
            self.state.login_identifier.clear();
            self.state.login_secret.clear();
            self.state.login_error = None;
            self.state.active_screen = Screen::Overview;
            let name = self
                .state
                .session
                .identity()
                .map(|i| i.display_name.clone())
                .unwrap_or_default();
            self.state.set_status(t!("login.signed_in", name = name).to_string());
        } else {
            self.state.login_secret.clear();
            self.state.login_error = Some(t!("login.invalid").to_string());
        }
    }

    /// Clear the session and start the workspace over. In-flight tickets are
    /// abandoned, so late completions from this session are dropped.
    fn sign_out(&mut self) {
        self.state.session.logout();
        self.state.conversation.reset();
        self.state.intel.reset();
        self.state.chat_input.clear();
        self.state.intel_input.clear();
        self.state.chat_typing = false;
        self.state.intel_typing = false;
        self.state.chat_scroll = 0;
        self.state.active_screen = Screen::Overview;
    }

    fn handle_key_chat_typing(&mut self, key: crossterm::event::KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.state.chat_typing = false;
                self.state.chat_input.clear();
            }
            KeyCode::Enter => {
                if let Some(ticket) = self.state.conversation.submit(self.state.chat_input.value())
                {
                    self.state.chat_input.clear();
                    self.state.chat_scroll = 0;
                    self.dispatch_query(ticket);
                }
                self.state.chat_typing = false;
            }
            KeyCode::Backspace => {
                self.state.chat_input.backspace();
            }
            KeyCode::Left => {
                self.state.chat_input.cursor_left();
            }
            KeyCode::Right => {
                self.state.chat_input.cursor_right();
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.conversation.reset();
                self.state.chat_input.clear();
                self.state.chat_scroll = 0;
                self.state.chat_typing = false;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.chat_input.insert_char(c);
            }
            _ => {}
        }
        false
    }

    fn handle_key_intel_typing(&mut self, key: crossterm::event::KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.state.intel_typing = false;
            }
            KeyCode::Enter => {
                if let Some(ticket) = self.state.intel.begin(self.state.intel_input.value()) {
                    self.dispatch_lookup(ticket);
                }
                self.state.intel_typing = false;
            }
            KeyCode::Backspace => {
                self.state.intel_input.backspace();
            }
            KeyCode::Left => {
                self.state.intel_input.cursor_left();
            }
            KeyCode::Right => {
                self.state.intel_input.cursor_right();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.intel_input.insert_char(c);
            }
            _ => {}
        }
        false
    }

    fn handle_key_normal(&mut self, key: crossterm::event::KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => {
                self.switch_screen(self.state.active_screen.next());
            }
            KeyCode::Char('1') => self.switch_screen(Screen::Overview),
            KeyCode::Char('2') => self.switch_screen(Screen::Investigate),
            KeyCode::Char('3') => self.switch_screen(Screen::Intel),
            KeyCode::Char('T') => self.state.cycle_theme(),
            KeyCode::Char('i') | KeyCode::Enter => match self.state.active_screen {
                Screen::Investigate => self.state.chat_typing = true,
                Screen::Intel => self.state.intel_typing = true,
                Screen::Overview => {}
            },
            KeyCode::Up => {
                if self.state.active_screen == Screen::Investigate && self.state.chat_scroll > 0 {
                    self.state.chat_scroll -= 1;
                }
            }
            KeyCode::Down => {
                if self.state.active_screen == Screen::Investigate {
                    self.state.chat_scroll += 1;
                }
            }
            KeyCode::PageUp => {
                if self.state.active_screen == Screen::Investigate {
                    self.state.chat_scroll = self.state.chat_scroll.saturating_sub(PAGE_SIZE);
                }
            }
            KeyCode::PageDown => {
                if self.state.active_screen == Screen::Investigate {
                    self.state.chat_scroll += PAGE_SIZE;
                }
            }
            _ => {}
        }
        false
    }

    /// Change the active screen. The first visit to the intel screen kicks
    /// off the one-time stats fetch.
    fn switch_screen(&mut self, screen: Screen) {
        self.state.active_screen = screen;
        if screen == Screen::Intel && self.state.intel.take_stats_request() {
            self.dispatch_stats();
        }
    }
}
