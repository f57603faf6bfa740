//! User interface rendering for the demo application.
//!
//! The screen has a title line, an optional bindings panel next to the
//! dispatch history, and a help bar at the bottom.

mod help_bar;

pub use help_bar::render_help_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Outcome};

/// Render the whole screen.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);

    if app.show_help() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);
        render_bindings(frame, columns[0], app);
        render_history(frame, columns[1], app);
    } else {
        render_history(frame, chunks[1], app);
    }

    render_help_bar(frame, chunks[2], &app.hints());
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " keybind ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" press keys to dispatch them through the registry"),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_bindings(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .binding_rows()
        .into_iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{keys:<16}"), Style::default().fg(Color::Cyan)),
                Span::raw(action),
            ])
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Bindings ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_history(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .history()
        .map(|record| {
            let color = match record.outcome {
                Outcome::Unchanged => Color::Gray,
                Outcome::Replaced(_) => Color::Yellow,
                Outcome::Consumed => Color::Green,
            };
            ListItem::new(record.describe()).style(Style::default().fg(color))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Dispatched ");
    frame.render_widget(List::new(items).block(block), area);
}
