pub mod document_view;
pub mod find_bar;
pub mod overlay;
pub mod status_bar;

use crate::app::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Document
            Constraint::Length(1), // Find bar
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    document_view::render(f, state, chunks[0]);
    find_bar::render(f, state, chunks[1]);
    status_bar::render(f, state, chunks[2]);

    if state.show_help {
        render_help_overlay(f, state);
    }

    overlay::render_native_menu(f, state);
    overlay::render_context_menu(f, state);
}

fn render_help_overlay(f: &mut Frame, state: &AppState) {
    let help_text = r#"
    selmenu Help

    Mouse:
      Left drag             Select text
      Right click           Copy menu on a selection
      Wheel                 Scroll

    View:
      ↑/↓ or j/k            Scroll one line
      PgUp/PgDn, Space      Scroll one page
      Tab or /              Focus find bar
      Ctrl+A                Select all
      Esc                   Close menu / clear selection
      ?                     Toggle help
      q                     Quit

    Find bar:
      Enter                 Select next match
      Shift+←/→             Extend selection
      Esc or Tab            Back to the document
    "#;

    let area = centered_rect(60, 70, f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(state.theme.background));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Style::default().fg(state.theme.foreground))
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
