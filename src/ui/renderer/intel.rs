//! Threat-intel screen: indicator stats, IP lookup form, result panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::intel::LookupReport;
use crate::ui::state::AppState;
use crate::utils::loading_dots;

use super::helpers::{input_line, key_badge};

pub fn render_intel(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stats card
            Constraint::Length(4), // Lookup form
            Constraint::Min(6),    // Result panel
        ])
        .split(area);

    render_stats(frame, chunks[0], state);
    render_form(frame, chunks[1], state);
    render_result(frame, chunks[2], state);
}

fn render_stats(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let stats = state.intel.stats();
    let card = Paragraph::new(Line::from(vec![
        Span::styled(
            t!("intel.total_iocs").to_string(),
            Style::default().fg(t.text_dim),
        ),
        Span::styled(
            format!(" {}", stats.total_indicators),
            Style::default()
                .fg(t.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .title(Span::styled(
                t!("intel.title").to_string(),
                t.header_style(),
            ))
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(card, area);
}

fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let border_style = if state.intel_typing && !state.intel.pending() {
        t.border_highlight_style()
    } else {
        t.border_style()
    };

    let placeholder = if state.intel.pending() {
        t!("intel.checking").to_string()
    } else {
        t!("intel.placeholder").to_string()
    };

    let mut lines = vec![input_line(
        &state.intel_input,
        &placeholder,
        state.intel_typing,
        None,
        t,
    )];
    lines.push(Line::from(vec![
        Span::styled("  ", Style::default()),
        key_badge("Enter", t.accent, t),
        Span::styled(
            t!("intel.key_check").to_string(),
            Style::default().fg(t.text_muted),
        ),
        key_badge("Esc", t.accent, t),
        Span::styled(t!("key.back").to_string(), Style::default().fg(t.text_muted)),
    ]));

    let form = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(
                t!("intel.lookup_title").to_string(),
                Style::default().fg(t.accent),
            ))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(form, area);
}

fn render_result(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    let (border_color, lines) = if state.intel.pending() {
        let dots = loading_dots(state.tick_count);
        (
            t.border,
            vec![
                Line::raw(""),
                Line::from(vec![Span::styled(
                    format!("  {}{}", t!("intel.checking"), dots),
                    Style::default().fg(t.accent),
                )]),
            ],
        )
    } else {
        match state.intel.report() {
            None => (
                t.border,
                vec![
                    Line::raw(""),
                    Line::from(vec![Span::styled(
                        format!("  {}", t!("intel.hint")),
                        Style::default().fg(t.text_muted),
                    )]),
                ],
            ),
            Some(report) => report_lines(report, t),
        }
    };

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(
                t!("intel.result_title").to_string(),
                Style::default().fg(t.accent),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(panel, area);
}

/// Result panel body for a finished lookup.
fn report_lines<'a>(
    report: &LookupReport,
    t: &crate::ui::theme::Theme,
) -> (ratatui::style::Color, Vec<Line<'a>>) {
    match report {
        LookupReport::Malicious {
            source,
            last_seen,
            tags,
            ..
        } => {
            let field = |label: String, value: String| {
                Line::from(vec![
                    Span::styled(format!("  {}", label), Style::default().fg(t.text_dim)),
                    Span::styled(value, Style::default().fg(t.text_primary)),
                ])
            };
            let lines = vec![
                Line::raw(""),
                Line::from(vec![Span::styled(
                    format!("  🛡 {}", report.verdict()),
                    Style::default().fg(t.danger).add_modifier(Modifier::BOLD),
                )]),
                Line::raw(""),
                field(t!("intel.source").to_string(), source.clone()),
                field(
                    t!("intel.confidence").to_string(),
                    report.confidence_percent().unwrap_or_default(),
                ),
                field(t!("intel.last_seen").to_string(), last_seen.clone()),
                field(
                    t!("intel.tags").to_string(),
                    tags.clone().unwrap_or_else(|| t!("intel.no_tags").to_string()),
                ),
            ];
            (t.danger, lines)
        }
        LookupReport::Clean => (
            t.success,
            vec![
                Line::raw(""),
                Line::from(vec![Span::styled(
                    format!("  🛡 {}", report.verdict()),
                    Style::default().fg(t.success).add_modifier(Modifier::BOLD),
                )]),
            ],
        ),
        LookupReport::Failed { message } => (
            t.danger,
            vec![
                Line::raw(""),
                Line::from(vec![Span::styled(
                    format!("  {}", message),
                    Style::default().fg(t.danger),
                )]),
            ],
        ),
    }
}
