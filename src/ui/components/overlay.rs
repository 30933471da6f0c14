use crate::app::{AppState, NativeAction};
use crate::geometry;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Converts a viewport rect to cells, cut to the frame.
fn to_cells(rect: geometry::Rect, bounds: Rect) -> Rect {
    let area = Rect::new(
        rect.left.max(0.0) as u16,
        rect.top.max(0.0) as u16,
        rect.width().max(0.0) as u16,
        rect.height().max(0.0) as u16,
    );
    area.intersection(bounds)
}

/// The selection menu, at its clamped position.
pub fn render_context_menu(f: &mut Frame, state: &AppState) {
    let Some(rect) = state
        .menu
        .as_ref()
        .and_then(|menu| menu.rendered_rect(state.viewport))
    else {
        return;
    };
    let area = to_cells(rect, f.area());
    if area.is_empty() {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(state.theme.menu_border))
        .style(Style::default().bg(state.theme.menu_bg));
    let copy = Paragraph::new(Line::from(" Copy"))
        .block(block)
        .style(
            Style::default()
                .fg(state.theme.menu_fg)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(Clear, area);
    f.render_widget(copy, area);
}

/// The host's own right-click menu.
pub fn render_native_menu(f: &mut Frame, state: &AppState) {
    let Some(native) = state.native_menu else {
        return;
    };
    let area = to_cells(native.rect(state.viewport), f.area());
    if area.is_empty() {
        return;
    }

    let lines: Vec<Line> = NativeAction::ALL
        .iter()
        .map(|action| Line::from(format!(" {}", action.label())))
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(state.theme.menu_bg));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(state.theme.menu_fg)),
        area,
    );
}
