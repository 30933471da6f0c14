//! Terminal copy command: the OSC 52 escape sequence. Terminals that
//! support it place the payload on the system clipboard, which also works
//! over SSH where no clipboard service is reachable.

use super::{ClipboardError, ScratchHost};
use crate::document::{Document, NodeId, TextControl};
use crate::geometry::Rect;
use base64::engine::general_purpose::STANDARD as BASE64_STD;
use base64::Engine as _;
use std::io::Write;

/// Larger transfers are truncated; some terminals drop the whole sequence
/// past their own limit.
pub const MAX_OSC52_BYTES: usize = 100 * 1024;

/// Off-screen origin for scratch elements.
const OFFSCREEN: f64 = -9999.0;

/// Builds `ESC ] 52 ; c ; <base64> BEL` for `text`.
pub fn encode(text: &str) -> String {
    let mut end = text.len().min(MAX_OSC52_BYTES);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("\x1b]52;c;{}\x07", BASE64_STD.encode(&text.as_bytes()[..end]))
}

pub fn write_osc52<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    out.write_all(encode(text).as_bytes())?;
    out.flush()
}

/// Runs the fallback copy against a [`Document`]: the scratch element is a
/// read-only text area placed off-screen, and the copy command emits the
/// active selection as OSC 52 on `out`.
pub struct TerminalCopyHost<'a, W: Write> {
    document: &'a mut Document,
    out: W,
    previous_focus: Option<NodeId>,
}

impl<'a, W: Write> TerminalCopyHost<'a, W> {
    pub fn new(document: &'a mut Document, out: W) -> Self {
        Self {
            document,
            out,
            previous_focus: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ScratchHost for TerminalCopyHost<'_, W> {
    type Handle = NodeId;

    fn mount_scratch(&mut self, text: &str) -> NodeId {
        let mut scratch = TextControl::multi_line(text, Rect::from_origin(OFFSCREEN, OFFSCREEN, 1.0, 1.0));
        scratch.read_only = true;
        self.previous_focus = self.document.focused();
        self.document.insert_control(scratch)
    }

    fn select_scratch(&mut self, handle: NodeId) {
        self.document.focus(handle);
        if let Some(scratch) = self.document.control_mut(handle) {
            scratch.select_all();
        }
    }

    fn exec_copy(&mut self) -> Result<bool, ClipboardError> {
        let Some(text) = self.document.active_selection_text() else {
            return Ok(false);
        };
        write_osc52(&mut self.out, &text)?;
        Ok(true)
    }

    fn unmount_scratch(&mut self, handle: NodeId) {
        self.document.remove_node(handle);
        if let Some(previous) = self.previous_focus.take() {
            self.document.focus(previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode("hello"), "\x1b]52;c;aGVsbG8=\x07");
    }

    #[test]
    fn test_encode_truncates_on_char_boundary() {
        let text = "é".repeat(MAX_OSC52_BYTES);
        let seq = encode(&text);
        let payload = seq
            .strip_prefix("\x1b]52;c;")
            .and_then(|s| s.strip_suffix('\x07'))
            .unwrap();
        let decoded = BASE64_STD.decode(payload).unwrap();
        assert_eq!(decoded.len(), MAX_OSC52_BYTES);
        assert!(String::from_utf8(decoded).is_ok());
    }

    #[test]
    fn test_write_osc52() {
        let mut out = Vec::new();
        write_osc52(&mut out, "hi").unwrap();
        assert_eq!(out, b"\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_host_restores_previous_focus() {
        let mut doc = Document::new("");
        let input = doc.insert_control(TextControl::single_line(Rect::default()));
        doc.focus(input);

        let mut host = TerminalCopyHost::new(&mut doc, Vec::new());
        let scratch = host.mount_scratch("copy me");
        host.select_scratch(scratch);
        assert!(host.exec_copy().unwrap());
        host.unmount_scratch(scratch);
        let out = host.into_inner();

        assert_eq!(out, encode("copy me").into_bytes());
        assert!(!doc.contains_node(scratch));
        assert_eq!(doc.focused(), Some(input));
    }
}
