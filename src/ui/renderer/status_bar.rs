//! Status bar at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::STATUS_MESSAGE_TIMEOUT_SECS;
use crate::ui::state::{AppState, Screen};

use super::helpers::key_badge;

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    let dim =
        |text: &str| -> Span { Span::styled(text.to_string(), Style::default().fg(t.text_dim)) };

    let mut spans = vec![
        Span::styled(" ", Style::default()),
        key_badge("q", t.accent, t),
        dim(&t!("status.quit")),
        key_badge("Tab", t.accent, t),
        dim(&t!("status.switch")),
        key_badge("T", t.accent, t),
        dim(&format!(" Theme: {} ", t.name)),
        key_badge("Ctrl+O", t.warning, t),
        dim(&t!("status.sign_out")),
    ];

    // Screen-specific shortcuts
    match state.active_screen {
        Screen::Investigate => {
            spans.push(key_badge("i", t.ai_accent, t));
            spans.push(dim(&t!("status.compose")));
            spans.push(key_badge("↑↓", t.accent, t));
            spans.push(dim(&t!("status.scroll")));
        }
        Screen::Intel => {
            spans.push(key_badge("i", t.accent, t));
            spans.push(dim(&t!("status.enter_ip")));
        }
        Screen::Overview => {}
    }

    // Show status message (e.g., sign-in confirmation) -- auto-expires
    if let Some((msg, when)) = &state.status_message {
        if when.elapsed().as_secs() < STATUS_MESSAGE_TIMEOUT_SECS {
            spans.push(Span::styled(
                format!("  {} ", msg),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            ));
        }
    }

    let status = Paragraph::new(Line::from(spans));
    frame.render_widget(status, area);
}
