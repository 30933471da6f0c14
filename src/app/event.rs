use super::mode::Mode;
use super::state::{AppState, NativeMenu};
use crate::document::NodeId;
use crate::event::{Dispatch, InputEvent, Key, MouseButton as InputButton};
use crate::geometry::Point;
use crate::utils::unicode::char_len;
use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

const WHEEL_STEP: isize = 3;

pub fn handle_terminal_event(event: Event, state: &mut AppState) -> Result<()> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(key, state),
        Event::Mouse(mouse) => handle_mouse_event(mouse, state),
        Event::Resize(width, height) => {
            state.resize(width, height);
            let viewport = state.viewport;
            dispatch(state, InputEvent::Resize(viewport));
        }
        _ => {}
    }
    Ok(())
}

/// Runs the listeners registered for `event`, capture phase first, and
/// returns the combined result. Page handling happens after this returns,
/// and only if propagation was not stopped.
pub fn dispatch(state: &mut AppState, event: InputEvent) -> Dispatch {
    let mut result = Dispatch::proceed();
    for registration in state.registry.listeners_for(event.kind()) {
        let Some(menu) = state.menu.as_mut().filter(|menu| menu.owns(registration.id)) else {
            continue;
        };
        let outcome = menu.handle_event(&event, &state.document, state.viewport);
        if let Some(text) = outcome.copy {
            state.start_copy(text);
        }
        result.default_prevented |= outcome.dispatch.default_prevented;
        result.propagation_stopped |= outcome.dispatch.propagation_stopped;
        if result.propagation_stopped {
            break;
        }
    }
    result
}

fn to_key(key: &KeyEvent) -> Key {
    match key.code {
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.should_quit = true;
        return;
    }

    let dispatched = dispatch(state, InputEvent::KeyDown { key: to_key(&key) });
    if dispatched.propagation_stopped {
        return;
    }

    if key.code == KeyCode::Esc {
        if state.native_menu.take().is_some() {
            return;
        }
        if state.show_help {
            state.show_help = false;
            return;
        }
    }

    match state.mode {
        Mode::Document => handle_document_key(key, state),
        Mode::Find => handle_find_key(key, state),
    }
}

fn handle_document_key(key: KeyEvent, state: &mut AppState) {
    let page = state.document_viewport().height.max(1.0) as isize;
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => state.should_quit = true,
        (KeyCode::Char('?'), _) => state.show_help = !state.show_help,
        (KeyCode::Tab, _) | (KeyCode::Char('/'), KeyModifiers::NONE) => state.focus_find_bar(),
        (KeyCode::Char('a'), KeyModifiers::CONTROL) => state.document.select_all(),
        (KeyCode::Esc, _) => state.document.clear_selection(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => scroll(state, -1),
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => scroll(state, 1),
        (KeyCode::PageUp, _) => scroll(state, -page),
        (KeyCode::PageDown, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => scroll(state, page),
        (KeyCode::Home, _) => scroll(state, isize::MIN / 2),
        (KeyCode::End, _) => scroll(state, isize::MAX / 2),
        _ => {}
    }
}

fn handle_find_key(key: KeyEvent, state: &mut AppState) {
    let extend = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Esc | KeyCode::Tab => state.focus_document(),
        KeyCode::Enter => state.find_next(),
        _ => {
            let Some(bar) = state.find_bar_mut() else {
                return;
            };
            match key.code {
                KeyCode::Left => bar.move_caret(-1, extend),
                KeyCode::Right => bar.move_caret(1, extend),
                KeyCode::Home => bar.move_caret_to(0, extend),
                KeyCode::End => {
                    let end = char_len(bar.value());
                    bar.move_caret_to(end, extend)
                }
                KeyCode::Backspace => bar.backspace(),
                KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    bar.select_all()
                }
                KeyCode::Char(c) => bar.insert_char(c),
                _ => {}
            }
        }
    }
}

/// Scrolls the document and reports the scroll to listeners.
fn scroll(state: &mut AppState, delta: isize) {
    if state.document.scroll_by(delta) {
        dispatch(state, InputEvent::Scroll);
        state.native_menu = None;
    }
}

pub fn handle_mouse_event(mouse: MouseEvent, state: &mut AppState) {
    let point = Point::cell_center(mouse.column, mouse.row);
    let target = state.document.hit_test(point);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Right) => {
            let dispatched = dispatch(state, InputEvent::ContextMenu { point, target });
            state.native_menu =
                (!dispatched.default_prevented).then_some(NativeMenu { anchor: point });
        }
        MouseEventKind::Down(button) => {
            let input_button = match button {
                MouseButton::Left => InputButton::Primary,
                MouseButton::Right => InputButton::Secondary,
                MouseButton::Middle => InputButton::Auxiliary,
            };
            let dispatched = dispatch(
                state,
                InputEvent::PointerDown {
                    point,
                    button: input_button,
                    target,
                },
            );
            if dispatched.propagation_stopped || input_button != InputButton::Primary {
                return;
            }
            pointer_down(state, point, target);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if state.dragging {
                if let Some(offset) = state.document.offset_at(point) {
                    state.document.extend_selection(offset);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => state.dragging = false,
        MouseEventKind::ScrollUp => scroll(state, -WHEEL_STEP),
        MouseEventKind::ScrollDown => scroll(state, WHEEL_STEP),
        _ => {}
    }
}

/// Page handling of a primary press: native menu items, the find bar,
/// or the start of a drag selection.
fn pointer_down(state: &mut AppState, point: Point, target: Option<NodeId>) {
    if let Some(native) = state.native_menu.take() {
        if let Some(action) = native.item_at(point, state.viewport) {
            state.run_native_action(action);
            return;
        }
    }

    if target == Some(state.find_bar) {
        let left = state.find_bar().map(|bar| bar.rect.left).unwrap_or(0.0);
        let caret = (point.x - left).max(0.0).floor() as usize;
        state.focus_find_bar();
        if let Some(bar) = state.find_bar_mut() {
            bar.move_caret_to(caret, false);
        }
        return;
    }

    if point.y >= state.document_viewport().height {
        return;
    }
    state.focus_document();
    if let Some(offset) = state.document.offset_at(point) {
        state.document.select(offset, offset);
        state.dragging = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::event::EventKind;
    use crate::menu::Visibility;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn state(content: &str) -> (tokio::runtime::Runtime, AppState) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut state = AppState::new(
            content,
            "test".to_string(),
            &Config::default(),
            runtime.handle().clone(),
            40,
            12,
        );
        state.copy_output = Box::new(std::io::sink());
        state.use_system_clipboard = false;
        (runtime, state)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn menu_visibility(state: &AppState) -> Visibility {
        state.menu.as_ref().unwrap().visibility()
    }

    #[test]
    fn test_drag_selects_text() {
        let (_rt, mut state) = state("hello world");
        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 6, 0), &mut state);
        handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 11, 0), &mut state);
        handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 11, 0), &mut state);
        assert_eq!(state.document.selection_text(), "world");
        assert!(!state.dragging);
    }

    #[test]
    fn test_right_click_on_selection_opens_custom_menu() {
        let (_rt, mut state) = state("hello world");
        state.document.select(0, 11);
        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 3, 0), &mut state);
        assert_eq!(menu_visibility(&state), Visibility::Shown);
        assert!(state.native_menu.is_none());
    }

    #[test]
    fn test_right_click_elsewhere_opens_native_menu() {
        let (_rt, mut state) = state("hello world\n\nmore");
        state.document.select(0, 11);
        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 3, 2), &mut state);
        assert_eq!(menu_visibility(&state), Visibility::Hidden);
        assert!(state.native_menu.is_some());
    }

    #[test]
    fn test_right_click_on_selection_dismisses_open_native_menu() {
        let (_rt, mut state) = state("hello world\n\nmore");
        state.document.select(0, 11);
        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 3, 2), &mut state);
        assert!(state.native_menu.is_some());

        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 3, 0), &mut state);
        assert_eq!(menu_visibility(&state), Visibility::Shown);
        assert!(state.native_menu.is_none());

        let rect = state
            .menu
            .as_ref()
            .unwrap()
            .rendered_rect(state.viewport)
            .unwrap();
        handle_mouse_event(
            mouse(
                MouseEventKind::Down(MouseButton::Left),
                rect.left as u16 + 1,
                rect.top as u16 + 1,
            ),
            &mut state,
        );
        assert_eq!(menu_visibility(&state), Visibility::Hidden);
        assert!(state.native_menu.is_none());
    }

    #[test]
    fn test_native_menu_select_all() {
        let (_rt, mut state) = state("hello world");
        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 2, 2), &mut state);
        let rect = state.native_menu.unwrap().rect(state.viewport);
        handle_mouse_event(
            mouse(
                MouseEventKind::Down(MouseButton::Left),
                rect.left as u16 + 1,
                rect.top as u16 + 1,
            ),
            &mut state,
        );
        assert!(state.native_menu.is_none());
        assert_eq!(state.document.selection_text(), "hello world");
    }

    #[test]
    fn test_copy_click_hides_menu_and_starts_copy() {
        let (_rt, mut state) = state("hello world");
        state.document.select(0, 11);
        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 3, 0), &mut state);
        let rect = state
            .menu
            .as_ref()
            .unwrap()
            .rendered_rect(state.viewport)
            .unwrap();

        handle_mouse_event(
            mouse(
                MouseEventKind::Down(MouseButton::Left),
                rect.left as u16 + 1,
                rect.top as u16 + 1,
            ),
            &mut state,
        );
        assert_eq!(menu_visibility(&state), Visibility::Hidden);
        assert_eq!(state.pending_copy_texts().collect::<Vec<_>>(), vec!["hello world"]);
        // The press went to the menu, not to the page.
        assert_eq!(state.document.selection_text(), "hello world");
    }

    #[test]
    fn test_escape_closes_menu_before_page_sees_it() {
        let (_rt, mut state) = state("hello world");
        state.document.select(0, 11);
        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 3, 0), &mut state);

        handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE), &mut state);
        assert_eq!(menu_visibility(&state), Visibility::Hidden);
        assert_eq!(state.document.selection_text(), "hello world");

        handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE), &mut state);
        assert!(state.document.selection().is_none());
    }

    #[test]
    fn test_wheel_scroll_closes_menu() {
        let content = (0..50).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let (_rt, mut state) = state(&content);
        state.document.select(0, 6);
        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 2, 0), &mut state);
        assert_eq!(menu_visibility(&state), Visibility::Shown);

        handle_mouse_event(mouse(MouseEventKind::ScrollDown, 2, 0), &mut state);
        assert_eq!(menu_visibility(&state), Visibility::Hidden);
        assert!(!state.has_pending_copies());
    }

    #[test]
    fn test_resize_closes_menu() {
        let (_rt, mut state) = state("hello world");
        state.document.select(0, 11);
        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 3, 0), &mut state);
        handle_terminal_event(Event::Resize(60, 20), &mut state).unwrap();
        assert_eq!(menu_visibility(&state), Visibility::Hidden);
        assert_eq!(state.document_viewport().height, 18.0);
    }

    #[test]
    fn test_find_bar_selection_offers_copy() {
        let (_rt, mut state) = state("document");
        handle_key_event(key(KeyCode::Tab, KeyModifiers::NONE), &mut state);
        for c in "needle".chars() {
            handle_key_event(key(KeyCode::Char(c), KeyModifiers::NONE), &mut state);
        }
        handle_key_event(key(KeyCode::Left, KeyModifiers::SHIFT), &mut state);
        handle_key_event(key(KeyCode::Left, KeyModifiers::SHIFT), &mut state);
        assert_eq!(state.find_bar().unwrap().selected_text(), "le");

        let row = state.find_bar_row();
        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 8, row), &mut state);
        assert_eq!(menu_visibility(&state), Visibility::Shown);
        assert_eq!(state.menu.as_ref().unwrap().state().text, "le");
    }

    #[test]
    fn test_menu_not_reachable_after_unmount() {
        let (_rt, mut state) = state("hello world");
        state.document.select(0, 11);
        state.unmount_menu().unwrap();
        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 3, 0), &mut state);
        assert!(state.native_menu.is_some());
    }

    #[test]
    fn test_dispatch_follows_registered_listeners() {
        let (_rt, mut state) = state("hello world");
        state.document.select(0, 11);
        let id = state.registry.listeners_for(EventKind::ContextMenu)[0].id;
        state.registry.remove(id).unwrap();

        handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 3, 0), &mut state);
        assert_eq!(menu_visibility(&state), Visibility::Hidden);
        assert!(state.native_menu.is_some());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let (_rt, mut state) = state("x");
        handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut state);
        assert!(state.should_quit);
    }
}
