use crate::app::AppState;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let document = &state.document;
    let Some(layout) = document.layout() else {
        return;
    };

    let base = Style::default()
        .fg(state.theme.foreground)
        .bg(state.theme.background);
    let selected = Style::default()
        .fg(state.theme.selection_fg)
        .bg(state.theme.selection_bg);
    let selection = document
        .selection()
        .filter(|s| !s.is_collapsed())
        .map(|s| (s.start(), s.end()));

    let lines: Vec<Line> = layout
        .rows
        .iter()
        .skip(document.scroll_offset())
        .take(area.height as usize)
        .map(|row| {
            let Some((start, end)) = selection else {
                return Line::from(Span::styled(document.row_text(row), base));
            };
            let lo = start.clamp(row.start, row.end);
            let hi = end.clamp(row.start, row.end);
            Line::from(vec![
                Span::styled(document.text_range(row.start, lo), base),
                Span::styled(document.text_range(lo, hi), selected),
                Span::styled(document.text_range(hi, row.end), base),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).style(base), area);
}
