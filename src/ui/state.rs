//! Central UI state - the single source of truth for rendering.

use crate::chat::ConversationEngine;
use crate::intel::LookupEngine;
use crate::session::SessionStore;

use super::theme::Theme;

/// A single-line text input with a byte-indexed cursor kept on char
/// boundaries.
#[derive(Debug, Default)]
pub struct InputField {
    value: String,
    cursor: usize,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor += self.value[self.cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Which screen is currently active in the authenticated workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview,
    Investigate,
    Intel,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[Screen::Overview, Screen::Investigate, Screen::Intel]
    }

    pub fn label(&self) -> String {
        match self {
            Screen::Overview => t!("tab.overview").to_string(),
            Screen::Investigate => t!("tab.investigate").to_string(),
            Screen::Intel => t!("tab.intel").to_string(),
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Screen::Overview => Screen::Investigate,
            Screen::Investigate => Screen::Intel,
            Screen::Intel => Screen::Overview,
        }
    }
}

/// Which login field has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Identifier,
    Secret,
}

/// Central application state. Owns the session store and both engines;
/// the renderer reads it, the app loop mutates it.
pub struct AppState {
    pub active_screen: Screen,
    pub tick_count: u64,
    pub theme: Theme,
    /// External analytics dashboard URL, shown on the overview screen.
    pub dashboard_url: String,

    // ── Session ────────────────────────────────────────────────
    pub session: SessionStore,

    // ── Status message (shown in status bar) ───────────────────
    pub status_message: Option<(String, std::time::Instant)>,

    // ── Login form ─────────────────────────────────────────────
    pub login_identifier: InputField,
    pub login_secret: InputField,
    pub login_focus: LoginField,
    pub login_error: Option<String>,

    // ── Investigation thread ───────────────────────────────────
    pub conversation: ConversationEngine,
    pub chat_input: InputField,
    pub chat_typing: bool,
    pub chat_scroll: usize,

    // ── Threat intel ───────────────────────────────────────────
    pub intel: LookupEngine,
    pub intel_input: InputField,
    pub intel_typing: bool,
}

impl AppState {
    pub fn new(session: SessionStore, theme: Theme, dashboard_url: String) -> Self {
        Self {
            active_screen: Screen::Overview,
            tick_count: 0,
            theme,
            dashboard_url,
            session,
            status_message: None,
            login_identifier: InputField::new(),
            login_secret: InputField::new(),
            login_focus: LoginField::Identifier,
            login_error: None,
            conversation: ConversationEngine::new(),
            chat_input: InputField::new(),
            chat_typing: false,
            chat_scroll: 0,
            intel: LookupEngine::new(),
            intel_input: InputField::new(),
            intel_typing: false,
        }
    }

    /// Cycle to the next built-in theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next_builtin();
    }

    /// Set a status bar message with automatic timestamp.
    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, std::time::Instant::now()));
    }

    /// Toggle which login field has focus.
    pub fn toggle_login_focus(&mut self) {
        self.login_focus = match self.login_focus {
            LoginField::Identifier => LoginField::Secret,
            LoginField::Secret => LoginField::Identifier,
        };
    }

    /// The login field currently holding focus.
    pub fn focused_login_field(&mut self) -> &mut InputField {
        match self.login_focus {
            LoginField::Identifier => &mut self.login_identifier,
            LoginField::Secret => &mut self.login_secret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── InputField ────────────────────────────────────────────────

    #[test]
    fn insert_and_value() {
        let mut f = InputField::new();
        f.insert_char('a');
        f.insert_char('b');
        assert_eq!(f.value(), "ab");
        assert_eq!(f.cursor(), 2);
    }

    #[test]
    fn insert_mid_string() {
        let mut f = InputField::new();
        f.insert_char('a');
        f.insert_char('c');
        f.cursor_left();
        f.insert_char('b');
        assert_eq!(f.value(), "abc");
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let mut f = InputField::new();
        f.insert_char('a');
        f.insert_char('b');
        f.backspace();
        assert_eq!(f.value(), "a");
        assert_eq!(f.cursor(), 1);
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut f = InputField::new();
        f.backspace();
        assert_eq!(f.value(), "");
        assert_eq!(f.cursor(), 0);
    }

    #[test]
    fn cursor_moves_stay_on_char_boundaries() {
        let mut f = InputField::new();
        f.insert_char('日');
        f.insert_char('本');
        assert_eq!(f.cursor(), 6);
        f.cursor_left();
        assert_eq!(f.cursor(), 3);
        f.cursor_right();
        assert_eq!(f.cursor(), 6);
        f.backspace();
        assert_eq!(f.value(), "日");
    }

    #[test]
    fn cursor_right_clamped_at_end() {
        let mut f = InputField::new();
        f.insert_char('x');
        f.cursor_right();
        assert_eq!(f.cursor(), 1);
    }

    #[test]
    fn clear_resets_value_and_cursor() {
        let mut f = InputField::new();
        f.insert_char('h');
        f.insert_char('i');
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.cursor(), 0);
    }

    // ── Screen ────────────────────────────────────────────────────

    #[test]
    fn screen_next_cycles() {
        assert_eq!(Screen::Overview.next(), Screen::Investigate);
        assert_eq!(Screen::Investigate.next(), Screen::Intel);
        assert_eq!(Screen::Intel.next(), Screen::Overview);
    }
}
