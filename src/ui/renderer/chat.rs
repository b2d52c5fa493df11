//! Investigate screen: assistant thread and input box.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::chat::MessageRole;
use crate::ui::state::AppState;
use crate::utils::{loading_dots, spinner_char};

use super::helpers::{input_line, key_badge, render_scrollbar};
use super::markdown::render_markdown;

pub fn render_investigate(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Thread history
            Constraint::Length(4), // Input box
        ])
        .split(area);

    render_thread(frame, chunks[0], state);
    render_input(frame, chunks[1], state);
}

fn render_thread(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let border_style = if state.conversation.pending() {
        Style::default().fg(t.ai_accent)
    } else {
        t.border_style()
    };

    let title = if state.conversation.pending() {
        let spinner = spinner_char(state.tick_count);
        t!("chat.thinking", spinner = spinner).to_string()
    } else {
        t!("chat.title").to_string()
    };

    // Connection dot mirrors the last query outcome
    let (dot, dot_style, link) = if state.conversation.last_error() {
        ("●", Style::default().fg(t.danger), t!("chat.offline"))
    } else {
        ("●", Style::default().fg(t.success), t!("chat.online"))
    };

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(
                title,
                Style::default()
                    .fg(t.ai_accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(dot, dot_style),
            Span::styled(format!(" {}", link), Style::default().fg(t.text_dim)),
        ]))
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let wrap_width = inner.width.saturating_sub(4) as usize;
    let mut lines: Vec<Line> = Vec::new();

    for msg in state.conversation.messages() {
        match msg.role {
            MessageRole::User => {
                lines.push(Line::from(vec![
                    Span::styled(
                        t!("chat.you").to_string(),
                        Style::default()
                            .fg(t.bg_dark)
                            .bg(t.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", msg.timestamp.format("%H:%M:%S")),
                        Style::default().fg(t.text_muted),
                    ),
                ]));
                for line in textwrap::wrap(&msg.content, wrap_width) {
                    lines.push(Line::from(vec![
                        Span::styled("  ", Style::default()),
                        Span::styled(line.to_string(), Style::default().fg(t.text_primary)),
                    ]));
                }
                lines.push(Line::raw(""));
            }
            MessageRole::Assistant => {
                lines.push(Line::from(vec![
                    Span::styled(
                        t!("chat.assistant").to_string(),
                        Style::default()
                            .fg(t.bg_dark)
                            .bg(t.ai_accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", msg.timestamp.format("%H:%M:%S")),
                        Style::default().fg(t.text_muted),
                    ),
                ]));
                lines.extend(render_markdown(&msg.content, wrap_width, t));
                lines.push(Line::raw(""));
            }
        }
    }

    // Pending indicator
    if state.conversation.pending() {
        let dots = loading_dots(state.tick_count);
        lines.push(Line::from(vec![Span::styled(
            format!("  {}{}", t!("chat.investigating"), dots),
            Style::default().fg(t.ai_accent),
        )]));
    }

    // Apply scrolling
    let visible_height = inner.height as usize;
    let total_lines = lines.len();
    let scroll = if state.chat_scroll > 0 {
        state
            .chat_scroll
            .min(total_lines.saturating_sub(visible_height))
    } else {
        // Auto-scroll to bottom
        total_lines.saturating_sub(visible_height)
    };

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .skip(scroll)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible_lines), inner);

    render_scrollbar(frame, inner, total_lines, scroll);
}

fn render_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    let border_style = if state.chat_typing && !state.conversation.pending() {
        t.border_highlight_style()
    } else {
        t.border_style()
    };

    let placeholder = if state.conversation.pending() {
        t!("chat.waiting").to_string()
    } else {
        t!("chat.placeholder").to_string()
    };

    let mut lines = vec![input_line(
        &state.chat_input,
        &placeholder,
        state.chat_typing,
        None,
        t,
    )];
    lines.push(Line::from(vec![
        Span::styled("  ", Style::default()),
        key_badge("Enter", t.accent, t),
        Span::styled(t!("key.send").to_string(), Style::default().fg(t.text_muted)),
        key_badge("Ctrl+L", t.accent, t),
        Span::styled(
            t!("key.clear_thread").to_string(),
            Style::default().fg(t.text_muted),
        ),
        key_badge("Esc", t.accent, t),
        Span::styled(t!("key.back").to_string(), Style::default().fg(t.text_muted)),
    ]));

    let input = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(
                t!("chat.input_title").to_string(),
                Style::default().fg(t.ai_accent),
            ))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, area);
}
