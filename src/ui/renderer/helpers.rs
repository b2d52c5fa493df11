//! Shared rendering helpers: input lines, scrollbar, centered rect.

use ratatui::{
    layout::{Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::ui::state::InputField;
use crate::ui::theme::Theme;

/// Build the display line for a text input, drawing a block cursor when the
/// field has focus. `mask` replaces every character (for secrets).
pub fn input_line<'a>(
    field: &InputField,
    placeholder: &str,
    focused: bool,
    mask: Option<char>,
    t: &Theme,
) -> Line<'a> {
    if field.is_empty() {
        if focused {
            return Line::from(vec![
                Span::styled(" ".to_string(), Style::default().fg(t.bg_dark).bg(t.accent)),
                Span::styled(
                    format!(" {}", placeholder),
                    Style::default().fg(t.text_muted),
                ),
            ]);
        }
        return Line::from(vec![Span::styled(
            format!("  {}", placeholder),
            Style::default().fg(t.text_muted),
        )]);
    }

    let shown: String = match mask {
        Some(m) => field.value().chars().map(|_| m).collect(),
        None => field.value().to_string(),
    };

    if !focused {
        return Line::from(vec![Span::styled(
            format!("  {}", shown),
            Style::default().fg(t.text_primary),
        )]);
    }

    // Cursor is a byte index into the unmasked value; recompute it for the
    // masked string, where every char is one mask character.
    let cursor = match mask {
        Some(m) => field.value()[..field.cursor()].chars().count() * m.len_utf8(),
        None => field.cursor(),
    };
    let before = shown[..cursor].to_string();
    let after = &shown[cursor..];
    let (at_cursor, rest) = match after.char_indices().nth(1).map(|(i, _)| i) {
        Some(split) => (after[..split].to_string(), after[split..].to_string()),
        None if after.is_empty() => (" ".to_string(), String::new()),
        None => (after.to_string(), String::new()),
    };

    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(before, Style::default().fg(t.text_primary)),
        Span::styled(at_cursor, Style::default().fg(t.bg_dark).bg(t.accent)),
        Span::styled(rest, Style::default().fg(t.text_primary)),
    ])
}

/// A keybind badge for footer hints.
pub fn key_badge<'a>(key: &str, color: ratatui::style::Color, t: &Theme) -> Span<'a> {
    Span::styled(
        format!(" {} ", key),
        Style::default()
            .fg(t.bg_dark)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    )
}

/// Render a vertical scrollbar on the right side of `area`.
///
/// Only renders if `total > visible_height`.
pub fn render_scrollbar(frame: &mut Frame, area: Rect, total: usize, position: usize) {
    let visible_height = area.height as usize;
    if total <= visible_height {
        return;
    }
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▲"))
        .end_symbol(Some("▼"));
    let mut scrollbar_state = ScrollbarState::new(total).position(position);
    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

/// A centered rect of at most `width` x `height` within `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 10, area);
        assert_eq!(rect.x, 25);
        assert_eq!(rect.y, 15);
        assert_eq!(rect.width, 50);
        assert_eq!(rect.height, 10);
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 8);
        let rect = centered_rect(50, 10, area);
        assert_eq!(rect.width, 30);
        assert_eq!(rect.height, 8);
    }

    #[test]
    fn masked_input_hides_the_value() {
        let t = Theme::default_dark();
        let mut field = InputField::new();
        for c in "secret".chars() {
            field.insert_char(c);
        }
        let line = input_line(&field, "", false, Some('•'), &t);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("••••••"));
        assert!(!text.contains("secret"));
    }
}
