//! Header bar: logo, screen strip, session summary.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::state::{AppState, Screen};
use crate::utils::spinner_char;

pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16), // Logo
            Constraint::Min(20),    // Screens
            Constraint::Length(32), // Session summary
        ])
        .split(area);

    // Logo
    let pulse = if state.tick_count % 2 == 0 { "●" } else { "○" };
    let logo = Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(pulse, Style::default().fg(t.success)),
        Span::styled(t!("app.name").to_string(), t.header_style()),
        Span::styled(
            t!("app.version").to_string(),
            Style::default().fg(t.text_muted),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(logo, chunks[0]);

    // Screens
    let screens: Vec<Span> = Screen::all()
        .iter()
        .map(|screen| {
            if *screen == state.active_screen {
                Span::styled(screen.label(), t.tab_active_style())
            } else if *screen == Screen::Investigate {
                Span::styled(screen.label(), Style::default().fg(t.ai_accent))
            } else {
                Span::styled(screen.label(), t.tab_inactive_style())
            }
        })
        .collect();

    let mut screen_spans = vec![Span::raw(" ")];
    for (i, screen) in screens.into_iter().enumerate() {
        screen_spans.push(screen);
        if i < Screen::all().len() - 1 {
            screen_spans.push(Span::styled(" │ ", Style::default().fg(t.text_muted)));
        }
    }

    // In-flight indicator for either engine
    if state.conversation.pending() || state.intel.pending() {
        screen_spans.push(Span::raw(" "));
        let spinner = spinner_char(state.tick_count);
        screen_spans.push(Span::styled(
            format!(" {} ", spinner),
            Style::default()
                .fg(t.bg_dark)
                .bg(t.ai_accent)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let screen_line = Paragraph::new(Line::from(screen_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(screen_line, chunks[1]);

    // Session summary
    let session_text = match state.session.identity() {
        Some(identity) => t!(
            "header.signed_in",
            name = identity.display_name,
            role = identity.role
        )
        .to_string(),
        None => t!("header.signed_out").to_string(),
    };
    let session_summary = Paragraph::new(Line::from(vec![Span::styled(
        session_text,
        Style::default().fg(t.text_dim),
    )]))
    .alignment(Alignment::Right)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(session_summary, chunks[2]);
}
