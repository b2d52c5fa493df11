//! Overview screen: session identity, collaborator services, dashboard link.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::state::AppState;

pub fn render_overview(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Session card
            Constraint::Length(6), // Services card
            Constraint::Min(4),    // Dashboard card
        ])
        .split(area);

    render_session_card(frame, chunks[0], state);
    render_services_card(frame, chunks[1], state);
    render_dashboard_card(frame, chunks[2], state);
}

fn render_session_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    let (name, role) = match state.session.identity() {
        Some(identity) => (identity.display_name.clone(), identity.role.clone()),
        None => (String::new(), String::new()),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("  {}", t!("overview.operator")),
                Style::default().fg(t.text_dim),
            ),
            Span::styled(
                name,
                Style::default()
                    .fg(t.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("  {}", t!("overview.role")),
                Style::default().fg(t.text_dim),
            ),
            Span::styled(role, Style::default().fg(t.accent_secondary)),
        ]),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(t!("overview.session").to_string(), t.header_style()))
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(card, area);
}

fn render_services_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    // The assistant link reflects the last query outcome; the intel line
    // shows the indicator count once the stats fetch has landed.
    let (ai_dot, ai_text) = if state.conversation.last_error() {
        (Style::default().fg(t.danger), t!("overview.offline"))
    } else {
        (Style::default().fg(t.success), t!("overview.online"))
    };

    let total = state.intel.stats().total_indicators;
    let intel_text = if total > 0 {
        t!("overview.indicators", count = total).to_string()
    } else {
        t!("overview.no_stats").to_string()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("  ● ", ai_dot),
            Span::styled(
                t!("overview.ai_service").to_string(),
                Style::default().fg(t.text_primary),
            ),
            Span::styled(format!("  {}", ai_text), Style::default().fg(t.text_dim)),
        ]),
        Line::from(vec![
            Span::styled("  ● ", Style::default().fg(t.info)),
            Span::styled(
                t!("overview.intel_service").to_string(),
                Style::default().fg(t.text_primary),
            ),
            Span::styled(format!("  {}", intel_text), Style::default().fg(t.text_dim)),
        ]),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(
                t!("overview.services").to_string(),
                t.header_style(),
            ))
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(card, area);
}

fn render_dashboard_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    let lines = vec![
        Line::from(vec![Span::styled(
            format!("  {}", t!("overview.dashboard_hint")),
            Style::default().fg(t.text_dim),
        )]),
        Line::from(vec![Span::styled(
            format!("  {}", state.dashboard_url),
            Style::default()
                .fg(t.accent)
                .add_modifier(Modifier::UNDERLINED),
        )]),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(
                t!("overview.dashboard").to_string(),
                t.header_style(),
            ))
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(card, area);
}
