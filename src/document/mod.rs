//! In-memory document: laid-out text content, one document-level selection,
//! text-input controls and transient scratch elements.
//!
//! Geometry is reported in viewport coordinates. The content area starts at
//! the viewport origin and scrolls vertically one row at a time.

pub mod control;
pub mod layout;

pub use control::TextControl;
pub use layout::{Layout, VisualRow};

use crate::geometry::{Point, Rect, Viewport};
use crate::utils::unicode::{char_width, chars_width};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

/// Failure of a client-rect query on the current selection range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("no layout computed for the current content")]
    LayoutUnavailable,
    #[error("range {start}..{end} is outside the document ({len} chars)")]
    StaleRange { start: usize, end: usize, len: usize },
}

/// Document-level selection as anchor/focus char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSelection {
    pub anchor: usize,
    pub focus: usize,
}

impl DocumentSelection {
    pub fn collapsed(at: usize) -> Self {
        Self { anchor: at, focus: at }
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.focus)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.focus)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

#[derive(Debug, Default)]
pub struct Document {
    chars: Vec<char>,
    layout: Option<Layout>,
    scroll: usize,
    selection: Option<DocumentSelection>,
    nodes: BTreeMap<NodeId, TextControl>,
    focus: Option<NodeId>,
    next_id: u32,
}

impl Document {
    pub fn new(content: &str) -> Self {
        Self {
            chars: content.chars().collect(),
            ..Self::default()
        }
    }

    pub fn char_count(&self) -> usize {
        self.chars.len()
    }

    pub fn text_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    pub fn row_text(&self, row: &VisualRow) -> String {
        self.text_range(row.start, row.end)
    }

    /// Replaces the content. Any layout and selection refer to the old
    /// content, so the layout is dropped and the selection cleared.
    pub fn set_content(&mut self, content: &str) {
        self.chars = content.chars().collect();
        self.layout = None;
        self.selection = None;
        self.scroll = 0;
    }

    pub fn lay_out(&mut self, viewport: Viewport) {
        let layout = Layout::compute(&self.chars, viewport.width as u16, viewport.height as u16);
        self.scroll = self.scroll.min(layout.max_scroll());
        self.layout = Some(layout);
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Scrolls by `delta` rows. Returns whether the offset changed.
    pub fn scroll_by(&mut self, delta: isize) -> bool {
        let max = self.layout.as_ref().map(Layout::max_scroll).unwrap_or(0);
        let next = self.scroll.saturating_add_signed(delta).min(max);
        let changed = next != self.scroll;
        self.scroll = next;
        changed
    }

    /// Scrolls so that char `offset` is on screen.
    pub fn scroll_into_view(&mut self, offset: usize) {
        let Some(layout) = &self.layout else {
            return;
        };
        let row = layout.row_of(offset);
        let height = layout.height.max(1) as usize;
        if row < self.scroll {
            self.scroll = row;
        } else if row >= self.scroll + height {
            self.scroll = (row + 1 - height).min(layout.max_scroll());
        }
    }

    pub fn selection(&self) -> Option<DocumentSelection> {
        self.selection
    }

    pub fn select(&mut self, anchor: usize, focus: usize) {
        let len = self.chars.len();
        self.selection = Some(DocumentSelection {
            anchor: anchor.min(len),
            focus: focus.min(len),
        });
    }

    pub fn extend_selection(&mut self, focus: usize) {
        let anchor = self.selection.map(|s| s.anchor).unwrap_or(focus);
        self.select(anchor, focus);
    }

    pub fn select_all(&mut self) {
        self.select(0, self.chars.len());
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Raw (untrimmed) text of the document selection.
    pub fn selection_text(&self) -> String {
        match self.selection {
            Some(sel) => self.text_range(sel.start(), sel.end()),
            None => String::new(),
        }
    }

    /// Client rectangles of the selection range, one per visual row it
    /// touches. Empty when there is no selection.
    pub fn selection_client_rects(&self) -> Result<Vec<Rect>, GeometryError> {
        let Some(sel) = self.selection else {
            return Ok(Vec::new());
        };
        let layout = match &self.layout {
            Some(layout) if layout.char_count == self.chars.len() => layout,
            _ => return Err(GeometryError::LayoutUnavailable),
        };
        let (start, end) = (sel.start(), sel.end());
        if end > self.chars.len() {
            return Err(GeometryError::StaleRange {
                start,
                end,
                len: self.chars.len(),
            });
        }

        let mut rects = Vec::new();
        for (idx, row) in layout.rows.iter().enumerate() {
            let lo = start.max(row.start);
            let hi = end.min(row.end);
            if hi <= lo {
                continue;
            }
            let left = chars_width(&self.chars[row.start..lo]) as f64;
            let right = chars_width(&self.chars[row.start..hi]) as f64;
            let top = idx as f64 - self.scroll as f64;
            rects.push(Rect::new(left, top, right, top + 1.0));
        }
        Ok(rects)
    }

    /// First occurrence of `needle` starting at char `from`, wrapping around
    /// to the start of the document.
    pub fn find(&self, needle: &str, from: usize) -> Option<usize> {
        let needle: Vec<char> = needle.chars().collect();
        if needle.is_empty() || needle.len() > self.chars.len() {
            return None;
        }
        let last = self.chars.len() - needle.len();
        let matches_at = |i: usize| self.chars[i..i + needle.len()] == needle[..];
        let from = from.min(last + 1);
        (from..=last)
            .find(|&i| matches_at(i))
            .or_else(|| (0..from.min(last + 1)).find(|&i| matches_at(i)))
    }

    /// Char offset under a viewport point, clamped into the content.
    pub fn offset_at(&self, point: Point) -> Option<usize> {
        let layout = self.layout.as_ref()?;
        let row_idx = (self.scroll as f64 + point.y.max(0.0)).floor() as usize;
        let Some(row) = layout.rows.get(row_idx) else {
            return layout.rows.last().map(|row| row.end);
        };
        let target = point.x.max(0.0).floor() as usize;
        let mut col = 0;
        for offset in row.start..row.end {
            let w = char_width(self.chars[offset]);
            if col + w > target {
                return Some(offset);
            }
            col += w;
        }
        Some(row.end)
    }

    /// Adds a control and returns its id. Later controls are on top.
    pub fn insert_control(&mut self, control: TextControl) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, control);
        id
    }

    pub fn remove_node(&mut self, id: NodeId) -> Option<TextControl> {
        if self.focus == Some(id) {
            self.focus = None;
        }
        self.nodes.remove(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn control(&self, id: NodeId) -> Option<&TextControl> {
        self.nodes.get(&id)
    }

    pub fn control_mut(&mut self, id: NodeId) -> Option<&mut TextControl> {
        self.nodes.get_mut(&id)
    }

    /// Topmost control whose rect contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|(_, control)| control.rect.contains(point))
            .map(|(id, _)| *id)
    }

    pub fn focus(&mut self, id: NodeId) -> bool {
        if self.nodes.contains_key(&id) {
            self.focus = Some(id);
            true
        } else {
            false
        }
    }

    pub fn blur(&mut self) {
        self.focus = None;
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus
    }

    /// What a copy command acts on: the focused control's selection if it
    /// has one, otherwise the document selection.
    pub fn active_selection_text(&self) -> Option<String> {
        if let Some(control) = self.focus.and_then(|id| self.nodes.get(&id)) {
            if control.has_selection() {
                return Some(control.selected_text().to_string());
            }
        }
        match self.selection {
            Some(sel) if !sel.is_collapsed() => Some(self.selection_text()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn laid_out(content: &str, width: f64, height: f64) -> Document {
        let mut doc = Document::new(content);
        doc.lay_out(Viewport::new(width, height));
        doc
    }

    #[test]
    fn test_single_row_rect() {
        let mut doc = laid_out("say hello world now", 80.0, 10.0);
        doc.select(4, 15);
        assert_eq!(doc.selection_text(), "hello world");
        assert_eq!(
            doc.selection_client_rects().unwrap(),
            vec![Rect::new(4.0, 0.0, 15.0, 1.0)]
        );
    }

    #[test]
    fn test_wrapped_selection_has_one_rect_per_row() {
        let mut doc = laid_out("aaaaabbbbbccccc", 5.0, 10.0);
        doc.select(3, 12);
        assert_eq!(
            doc.selection_client_rects().unwrap(),
            vec![
                Rect::new(3.0, 0.0, 5.0, 1.0),
                Rect::new(0.0, 1.0, 5.0, 2.0),
                Rect::new(0.0, 2.0, 2.0, 3.0),
            ]
        );
    }

    #[test]
    fn test_backward_selection() {
        let mut doc = laid_out("hello world", 80.0, 10.0);
        doc.select(11, 6);
        assert_eq!(doc.selection_text(), "world");
        assert_eq!(
            doc.selection_client_rects().unwrap(),
            vec![Rect::new(6.0, 0.0, 11.0, 1.0)]
        );
    }

    #[test]
    fn test_rects_follow_scroll() {
        let mut doc = laid_out("l0\nl1\nl2\nl3\nl4", 80.0, 2.0);
        assert!(doc.scroll_by(2));
        doc.select(6, 8);
        assert_eq!(
            doc.selection_client_rects().unwrap(),
            vec![Rect::new(0.0, 0.0, 2.0, 1.0)]
        );
    }

    #[test]
    fn test_rects_without_layout_fail() {
        let mut doc = Document::new("hello");
        doc.select(0, 5);
        assert_eq!(
            doc.selection_client_rects(),
            Err(GeometryError::LayoutUnavailable)
        );
    }

    #[test]
    fn test_stale_layout_fails() {
        let mut doc = laid_out("hello", 80.0, 10.0);
        doc.set_content("hello again");
        doc.select(0, 5);
        assert_eq!(
            doc.selection_client_rects(),
            Err(GeometryError::LayoutUnavailable)
        );
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut doc = laid_out("a\nb\nc", 80.0, 2.0);
        assert!(doc.scroll_by(10));
        assert_eq!(doc.scroll_offset(), 1);
        assert!(!doc.scroll_by(1));
        assert!(doc.scroll_by(-5));
        assert_eq!(doc.scroll_offset(), 0);
    }

    #[test]
    fn test_offset_at() {
        let doc = laid_out("hello\nworld", 80.0, 10.0);
        assert_eq!(doc.offset_at(Point::cell_center(0, 0)), Some(0));
        assert_eq!(doc.offset_at(Point::cell_center(3, 1)), Some(9));
        assert_eq!(doc.offset_at(Point::cell_center(40, 1)), Some(11));
        assert_eq!(doc.offset_at(Point::cell_center(0, 9)), Some(11));
    }

    #[test]
    fn test_find_wraps_around() {
        let doc = Document::new("one two one two");
        assert_eq!(doc.find("two", 0), Some(4));
        assert_eq!(doc.find("two", 5), Some(12));
        assert_eq!(doc.find("one", 9), Some(0));
        assert_eq!(doc.find("three", 0), None);
        assert_eq!(doc.find("", 0), None);
        assert_eq!(doc.find("two", 99), Some(4));
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut doc = Document::new("");
        let below = doc.insert_control(TextControl::single_line(Rect::new(0.0, 0.0, 10.0, 1.0)));
        let above = doc.insert_control(TextControl::single_line(Rect::new(5.0, 0.0, 10.0, 1.0)));
        assert_eq!(doc.hit_test(Point::new(2.0, 0.5)), Some(below));
        assert_eq!(doc.hit_test(Point::new(7.0, 0.5)), Some(above));
        assert_eq!(doc.hit_test(Point::new(20.0, 0.5)), None);
    }

    #[test]
    fn test_remove_focused_node_blurs() {
        let mut doc = Document::new("");
        let id = doc.insert_control(TextControl::single_line(Rect::default()));
        assert!(doc.focus(id));
        doc.remove_node(id);
        assert_eq!(doc.focused(), None);
        assert!(!doc.contains_node(id));
        assert!(!doc.focus(id));
    }

    #[test]
    fn test_active_selection_prefers_focused_control() {
        let mut doc = laid_out("document text", 80.0, 10.0);
        doc.select(0, 8);
        assert_eq!(doc.active_selection_text().as_deref(), Some("document"));

        let mut control = TextControl::single_line(Rect::default());
        control.set_value("typed");
        control.select_all();
        let id = doc.insert_control(control);
        doc.focus(id);
        assert_eq!(doc.active_selection_text().as_deref(), Some("typed"));

        doc.control_mut(id).unwrap().set_selection_range(0, 0);
        assert_eq!(doc.active_selection_text().as_deref(), Some("document"));
    }
}
