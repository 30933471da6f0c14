use crate::app::state::FIND_LABEL;
use crate::app::{AppState, Mode};
use crate::utils::unicode::char_slice;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let Some(bar) = state.find_bar() else {
        return;
    };

    let base = Style::default().fg(state.theme.foreground);
    let selected = Style::default()
        .fg(state.theme.selection_fg)
        .bg(state.theme.selection_bg);
    let value = bar.value();
    let (start, end) = (bar.selection_start(), bar.selection_end());

    let line = Line::from(vec![
        Span::styled(
            FIND_LABEL,
            Style::default()
                .fg(state.theme.find_label)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(char_slice(value, 0, start), base),
        Span::styled(char_slice(value, start, end), selected),
        Span::styled(char_slice(value, end, usize::MAX), base),
    ]);
    f.render_widget(Paragraph::new(line), area);

    if state.mode == Mode::Find {
        let before_caret = char_slice(value, 0, bar.caret()).width() as u16;
        let x = area.x + FIND_LABEL.len() as u16 + before_caret;
        f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
    }
}
