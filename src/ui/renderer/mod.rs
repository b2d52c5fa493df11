//! Renderer module: split into focused submodules.
//!
//! - `login`: Sign-in card shown while unauthenticated
//! - `header`: Logo, screen strip, session summary
//! - `status_bar`: Bottom status bar with keybinds and session state
//! - `overview`: Overview screen (session, services, dashboard link)
//! - `chat`: Investigate screen (assistant thread + input)
//! - `intel`: Threat-intel screen (stats, lookup form, result panel)
//! - `markdown`: Safe-subset markdown for assistant replies
//! - `helpers`: Shared rendering utilities

mod chat;
mod header;
pub mod helpers;
mod intel;
mod login;
pub mod markdown;
mod overview;
mod status_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::session::SessionState;

use super::state::{AppState, Screen};

/// Top-level render function. The session store gates everything: until it
/// is authenticated only the loading splash or the sign-in card renders.
pub fn render(frame: &mut Frame, state: &AppState) {
    let size = frame.area();

    match state.session.state() {
        SessionState::Loading => {
            render_loading(frame, state);
            return;
        }
        SessionState::Unauthenticated => {
            login::render_login(frame, size, state);
            return;
        }
        SessionState::Authenticated(_) => {}
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header bar
            Constraint::Min(10),   // Content area
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    header::render_header(frame, main_chunks[0], state);
    status_bar::render_status_bar(frame, main_chunks[2], state);

    match state.active_screen {
        Screen::Overview => overview::render_overview(frame, main_chunks[1], state),
        Screen::Investigate => chat::render_investigate(frame, main_chunks[1], state),
        Screen::Intel => intel::render_intel(frame, main_chunks[1], state),
    }
}

fn render_loading(frame: &mut Frame, state: &AppState) {
    let t = &state.theme;
    let splash = Paragraph::new(Line::from(vec![Span::styled(
        t!("session.restoring").to_string(),
        Style::default().fg(t.text_dim),
    )]))
    .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(splash, frame.area());
}
