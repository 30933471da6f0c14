use crate::geometry::Rect;
use crate::utils::unicode::{char_len, char_slice};

/// A text-input-like element: a single-line input or a multi-line area.
///
/// `selection_start`/`selection_end` are char offsets into `value`, always
/// ordered and clamped to the value length. The caret sits at
/// `selection_end` when the selection is collapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct TextControl {
    value: String,
    selection_start: usize,
    selection_end: usize,
    /// Fixed end of a keyboard-extended selection.
    anchor: usize,
    pub multiline: bool,
    pub read_only: bool,
    pub rect: Rect,
}

impl TextControl {
    pub fn single_line(rect: Rect) -> Self {
        Self {
            value: String::new(),
            selection_start: 0,
            selection_end: 0,
            anchor: 0,
            multiline: false,
            read_only: false,
            rect,
        }
    }

    pub fn multi_line(value: impl Into<String>, rect: Rect) -> Self {
        let mut control = Self::single_line(rect);
        control.multiline = true;
        control.set_value(value);
        control
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value and puts the caret at the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        let end = char_len(&self.value);
        self.set_selection_range(end, end);
    }

    pub fn selection_start(&self) -> usize {
        self.selection_start
    }

    pub fn selection_end(&self) -> usize {
        self.selection_end
    }

    pub fn has_selection(&self) -> bool {
        self.selection_start != self.selection_end
    }

    pub fn selected_text(&self) -> &str {
        char_slice(&self.value, self.selection_start, self.selection_end)
    }

    pub fn set_selection_range(&mut self, start: usize, end: usize) {
        let len = char_len(&self.value);
        let (start, end) = (start.min(len), end.min(len));
        self.anchor = start;
        self.selection_start = start.min(end);
        self.selection_end = start.max(end);
    }

    pub fn select_all(&mut self) {
        self.set_selection_range(0, char_len(&self.value));
    }

    pub fn caret(&self) -> usize {
        if self.anchor == self.selection_start {
            self.selection_end
        } else {
            self.selection_start
        }
    }

    /// Moves the caret by `delta` chars. With `extend`, the selection grows
    /// from its anchor instead of collapsing.
    pub fn move_caret(&mut self, delta: isize, extend: bool) {
        let len = char_len(&self.value);
        let caret = self.caret().saturating_add_signed(delta).min(len);
        if extend {
            let anchor = self.anchor;
            self.selection_start = anchor.min(caret);
            self.selection_end = anchor.max(caret);
        } else {
            self.set_selection_range(caret, caret);
        }
    }

    pub fn move_caret_to(&mut self, position: usize, extend: bool) {
        let delta = position as isize - self.caret() as isize;
        self.move_caret(delta, extend);
    }

    /// Replaces the selection (or inserts at the caret) with `c`.
    pub fn insert_char(&mut self, c: char) {
        if self.read_only {
            return;
        }
        self.delete_selection();
        let at = crate::utils::unicode::byte_index(&self.value, self.selection_start);
        self.value.insert(at, c);
        let caret = self.selection_start + 1;
        self.set_selection_range(caret, caret);
    }

    pub fn backspace(&mut self) {
        if self.read_only {
            return;
        }
        if self.has_selection() {
            self.delete_selection();
            return;
        }
        if self.selection_start == 0 {
            return;
        }
        let caret = self.selection_start - 1;
        self.set_selection_range(caret, caret + 1);
        self.delete_selection();
    }

    fn delete_selection(&mut self) {
        if !self.has_selection() {
            return;
        }
        let start = crate::utils::unicode::byte_index(&self.value, self.selection_start);
        let end = crate::utils::unicode::byte_index(&self.value, self.selection_end);
        self.value.replace_range(start..end, "");
        let caret = self.selection_start;
        self.set_selection_range(caret, caret);
    }
}
