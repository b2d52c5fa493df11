//! Safe-subset markdown rendering for assistant replies.
//!
//! Assistant content is untrusted. Only bold, inline code, fenced code
//! blocks, bullet lists, and headings are understood; everything else is
//! shown as literal text, never interpreted.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::theme::Theme;

/// Render one message body into wrapped, styled lines.
pub fn render_markdown(content: &str, width: usize, t: &Theme) -> Vec<Line<'static>> {
    let width = width.max(10);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut in_code_block = false;
    // Inline marker state survives wrapping, so a span split across wrapped
    // lines keeps its style.
    let mut bold = false;
    let mut inline_code = false;

    for raw in content.lines() {
        let trimmed = raw.trim_start();

        // Fence lines toggle the block and are not rendered themselves
        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }

        if in_code_block {
            for piece in textwrap::wrap(raw, width) {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        piece.into_owned(),
                        Style::default().fg(t.accent_secondary),
                    ),
                ]));
            }
            continue;
        }

        if raw.trim().is_empty() {
            lines.push(Line::raw(""));
            continue;
        }

        // Headings render as bold text, hashes stripped
        if let Some(heading) = trimmed.strip_prefix('#') {
            let text = heading.trim_start_matches('#').trim_start();
            for piece in textwrap::wrap(text, width) {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        piece.into_owned(),
                        Style::default()
                            .fg(t.text_primary)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
            continue;
        }

        // Bullet items get a uniform marker and hanging indent
        let (prefix, cont_prefix, body) = if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            ("  • ", "    ", item)
        } else {
            ("  ", "  ", trimmed)
        };

        let wrap_width = width.saturating_sub(prefix.len()).max(10);
        for (i, piece) in textwrap::wrap(body, wrap_width).iter().enumerate() {
            let lead = if i == 0 { prefix } else { cont_prefix };
            let mut spans = vec![Span::raw(lead.to_string())];
            spans.extend(inline_spans(piece, &mut bold, &mut inline_code, t));
            lines.push(Line::from(spans));
        }
    }

    lines
}

/// Split one piece of text into styled spans, toggling on `**` and `` ` ``.
/// Marker state is carried by the caller so it spans wrapped lines.
fn inline_spans(
    text: &str,
    bold: &mut bool,
    inline_code: &mut bool,
    t: &Theme,
) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut buf = String::new();
    let mut chars = text.chars().peekable();

    let flush = |buf: &mut String, spans: &mut Vec<Span<'static>>, bold: bool, code: bool| {
        if buf.is_empty() {
            return;
        }
        let style = if code {
            Style::default().fg(t.accent_secondary)
        } else if bold {
            Style::default()
                .fg(t.ai_response)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.ai_response)
        };
        spans.push(Span::styled(std::mem::take(buf), style));
    };

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') && !*inline_code => {
                chars.next();
                flush(&mut buf, &mut spans, *bold, *inline_code);
                *bold = !*bold;
            }
            '`' => {
                flush(&mut buf, &mut spans, *bold, *inline_code);
                *inline_code = !*inline_code;
            }
            _ => buf.push(c),
        }
    }
    flush(&mut buf, &mut spans, *bold, *inline_code);
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn plain_text_renders_verbatim() {
        let t = Theme::default_dark();
        let lines = render_markdown("hello analyst", 80, &t);
        assert_eq!(lines.len(), 1);
        assert!(flat(&lines).contains("hello analyst"));
    }

    #[test]
    fn bold_markers_become_bold_spans() {
        let t = Theme::default_dark();
        let lines = render_markdown("a **critical** alert", 80, &t);
        let line = &lines[0];
        let bold_span = line
            .spans
            .iter()
            .find(|s| s.content.as_ref() == "critical")
            .expect("bold segment present");
        assert!(bold_span.style.add_modifier.contains(Modifier::BOLD));
        // Markers themselves never render
        assert!(!flat(&lines).contains("**"));
    }

    #[test]
    fn inline_code_is_styled_and_unwrapped_of_backticks() {
        let t = Theme::default_dark();
        let lines = render_markdown("run `whois 1.2.3.4` now", 80, &t);
        let code_span = lines[0]
            .spans
            .iter()
            .find(|s| s.content.as_ref() == "whois 1.2.3.4")
            .expect("code segment present");
        assert_eq!(code_span.style.fg, Some(t.accent_secondary));
        assert!(!flat(&lines).contains('`'));
    }

    #[test]
    fn fenced_code_block_drops_fences_and_styles_lines() {
        let t = Theme::default_dark();
        let lines = render_markdown("```\ncurl -s http://x\n```", 80, &t);
        let text = flat(&lines);
        assert!(text.contains("curl -s http://x"));
        assert!(!text.contains("```"));
    }

    #[test]
    fn bullets_get_a_marker() {
        let t = Theme::default_dark();
        let lines = render_markdown("- first\n- second", 80, &t);
        let text = flat(&lines);
        assert!(text.contains("• first"));
        assert!(text.contains("• second"));
    }

    #[test]
    fn long_lines_wrap_to_width() {
        let t = Theme::default_dark();
        let lines = render_markdown(&"word ".repeat(30), 20, &t);
        assert!(lines.len() > 1);
    }

    #[test]
    fn script_like_content_stays_literal() {
        let t = Theme::default_dark();
        let lines = render_markdown("<script>alert(1)</script>", 80, &t);
        assert!(flat(&lines).contains("<script>alert(1)</script>"));
    }

    #[test]
    fn heading_hashes_are_stripped() {
        let t = Theme::default_dark();
        let lines = render_markdown("## Findings", 80, &t);
        let text = flat(&lines);
        assert!(text.contains("Findings"));
        assert!(!text.contains('#'));
    }
}
