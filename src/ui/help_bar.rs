//! Help bar component.
//!
//! Displays keyboard shortcut hints at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render a single line of hints such as `"[q] quit  [?] bindings"`.
///
/// Text in brackets is highlighted as a key.
pub fn render_help_bar(frame: &mut Frame, area: Rect, hints: &str) {
    let line = Line::from(parse_hints_to_spans(hints));
    frame.render_widget(Paragraph::new(line), area);
}

/// Split hint text into key spans (bracketed) and description spans.
fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    let mut rest = hints;

    while let Some(start) = rest.find('[') {
        let Some(len) = rest[start..].find(']') else {
            break;
        };
        let end = start + len + 1;

        if start > 0 {
            spans.push(Span::styled(rest[..start].to_string(), text_style));
        }
        spans.push(Span::styled(rest[start..end].to_string(), key_style));
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }

    spans
}
