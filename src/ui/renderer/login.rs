//! Sign-in card shown while the session is unauthenticated.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::constants::{LOGIN_CARD_HEIGHT, LOGIN_CARD_WIDTH};
use crate::ui::state::{AppState, LoginField};

use super::helpers::{centered_rect, input_line, key_badge};

pub fn render_login(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    let card = centered_rect(LOGIN_CARD_WIDTH, LOGIN_CARD_HEIGHT, area);
    frame.render_widget(Clear, card);

    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![Span::styled(
            t!("login.welcome").to_string(),
            Style::default()
                .fg(t.text_primary)
                .add_modifier(Modifier::BOLD),
        )])
        .alignment(Alignment::Center),
        Line::from(vec![Span::styled(
            t!("login.subtitle").to_string(),
            Style::default().fg(t.text_dim),
        )])
        .alignment(Alignment::Center),
        Line::raw(""),
    ];

    // Inline error from a rejected sign-in attempt
    if let Some(error) = &state.login_error {
        lines.push(
            Line::from(vec![Span::styled(
                error.clone(),
                Style::default().fg(t.danger),
            )])
            .alignment(Alignment::Center),
        );
    } else {
        lines.push(Line::raw(""));
    }
    lines.push(Line::raw(""));

    lines.push(Line::from(vec![Span::styled(
        format!("  {}", t!("login.identifier")),
        Style::default().fg(t.text_dim),
    )]));
    lines.push(input_line(
        &state.login_identifier,
        &t!("login.identifier_hint"),
        state.login_focus == LoginField::Identifier,
        None,
        t,
    ));
    lines.push(Line::from(vec![Span::styled(
        format!("  {}", t!("login.secret")),
        Style::default().fg(t.text_dim),
    )]));
    lines.push(input_line(
        &state.login_secret,
        &t!("login.secret_hint"),
        state.login_focus == LoginField::Secret,
        Some('•'),
        t,
    ));

    lines.push(Line::raw(""));
    lines.push(
        Line::from(vec![
            key_badge("Tab", t.accent, t),
            Span::styled(
                t!("login.key_field").to_string(),
                Style::default().fg(t.text_muted),
            ),
            key_badge("Enter", t.accent, t),
            Span::styled(
                t!("login.key_submit").to_string(),
                Style::default().fg(t.text_muted),
            ),
        ])
        .alignment(Alignment::Center),
    );

    let pulse = if state.tick_count % 2 == 0 { "●" } else { "○" };
    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(Line::from(vec![
                Span::styled(format!(" {} ", pulse), Style::default().fg(t.success)),
                Span::styled(t!("app.name").to_string(), t.header_style()),
            ]))
            .borders(Borders::ALL)
            .border_style(t.border_highlight_style()),
    );
    frame.render_widget(panel, card);
}
