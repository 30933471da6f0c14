use crate::app::AppState;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let rows = state
        .document
        .layout()
        .map(|layout| layout.rows.len())
        .unwrap_or(0);
    let selected_chars = state
        .document
        .selection()
        .map(|s| s.end() - s.start())
        .unwrap_or(0);

    let mut left_content = format!(
        " {} | {} | {}/{}",
        state.mode,
        state.title,
        (state.document.scroll_offset() + 1).min(rows.max(1)),
        rows
    );
    if selected_chars > 0 {
        left_content.push_str(&format!(" | {selected_chars} selected"));
    }
    if let Some((message, _)) = &state.status_message {
        left_content.push_str(&format!(" | {message}"));
    }

    let nav_hint = "? help  q quit";
    let version_text = format!("v{VERSION}");

    let padding = area.width.saturating_sub(
        left_content.len() as u16 + nav_hint.len() as u16 + version_text.len() as u16 + 3,
    );

    let status_line = format!(
        "{} {} {:>padding$} {}",
        left_content,
        nav_hint,
        "",
        version_text,
        padding = padding as usize
    );

    let style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg);

    f.render_widget(
        Paragraph::new(Line::from(vec![Span::styled(status_line, style)])).style(style),
        area,
    );
}
