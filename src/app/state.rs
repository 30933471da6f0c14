use super::mode::Mode;
use crate::clipboard::{
    complete_copy, AsyncClipboard, ClipboardError, CopyOutcome, DisabledClipboard,
    SystemClipboard, TerminalCopyHost,
};
use crate::config::Config;
use crate::document::{Document, NodeId, TextControl};
use crate::geometry::{Point, Rect, Viewport};
use crate::menu::{menu_rect, ContextMenu, ListenerRegistry, MenuMetrics};
use crate::ui::theme::Theme;
use anyhow::Result;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, info};

const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(3);

pub const FIND_LABEL: &str = "Find: ";

/// Rows below the document: find bar and status bar.
const CHROME_ROWS: u16 = 2;

/// Entries of the host's own right-click menu, shown when the selection
/// menu lets the gesture through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeAction {
    SelectAll,
    ClearSelection,
}

impl NativeAction {
    pub const ALL: [NativeAction; 2] = [NativeAction::SelectAll, NativeAction::ClearSelection];

    pub fn label(&self) -> &'static str {
        match self {
            NativeAction::SelectAll => "Select all",
            NativeAction::ClearSelection => "Clear selection",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeMenu {
    pub anchor: Point,
}

impl NativeMenu {
    pub fn metrics() -> MenuMetrics {
        MenuMetrics {
            width: 19.0,
            height: NativeAction::ALL.len() as f64 + 2.0,
            padding: 0.0,
        }
    }

    pub fn rect(&self, viewport: Viewport) -> Rect {
        menu_rect(self.anchor, viewport, Self::metrics())
    }

    /// Item under `point`; the first and last rows are the border.
    pub fn item_at(&self, point: Point, viewport: Viewport) -> Option<NativeAction> {
        let rect = self.rect(viewport);
        if !rect.contains(point) {
            return None;
        }
        let row = (point.y - rect.top).floor() as usize;
        row.checked_sub(1).and_then(|idx| NativeAction::ALL.get(idx).copied())
    }
}

/// A primary-tier clipboard write in flight.
struct PendingCopy {
    text: String,
    result: oneshot::Receiver<Result<(), ClipboardError>>,
}

pub struct AppState {
    pub document: Document,
    pub find_bar: NodeId,
    pub registry: ListenerRegistry,
    pub menu: Option<ContextMenu>,
    pub native_menu: Option<NativeMenu>,
    pub viewport: Viewport,
    pub mode: Mode,
    pub theme: Theme,
    pub title: String,
    pub dragging: bool,
    pub show_help: bool,
    pub should_quit: bool,
    pub status_message: Option<(String, Instant)>,
    pub use_system_clipboard: bool,
    /// Where the terminal copy sequence goes.
    pub copy_output: Box<dyn Write>,
    runtime: Handle,
    pending_copies: Vec<PendingCopy>,
}

impl AppState {
    pub fn new(
        content: &str,
        title: String,
        config: &Config,
        runtime: Handle,
        width: u16,
        height: u16,
    ) -> Self {
        let mut document = Document::new(content);
        let find_bar = document.insert_control(TextControl::single_line(Rect::default()));
        let mut registry = ListenerRegistry::new();
        let menu = ContextMenu::mount(&mut registry, config.menu.metrics());

        let mut state = Self {
            document,
            find_bar,
            registry,
            menu: Some(menu),
            native_menu: None,
            viewport: Viewport::default(),
            mode: Mode::Document,
            theme: Theme::from_config(config),
            title,
            dragging: false,
            show_help: false,
            should_quit: false,
            status_message: None,
            use_system_clipboard: config.clipboard.system,
            copy_output: Box::new(io::stdout()),
            runtime,
            pending_copies: Vec::new(),
        };
        state.resize(width, height);
        state
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width as f64, height as f64);
        self.document.lay_out(self.document_viewport());

        let row = self.find_bar_row() as f64;
        let left = FIND_LABEL.len() as f64;
        if let Some(find_bar) = self.document.control_mut(self.find_bar) {
            find_bar.rect = Rect::new(left, row, width as f64, row + 1.0);
        }
    }

    pub fn document_viewport(&self) -> Viewport {
        Viewport::new(
            self.viewport.width,
            (self.viewport.height - CHROME_ROWS as f64).max(0.0),
        )
    }

    pub fn find_bar_row(&self) -> u16 {
        (self.viewport.height as u16).saturating_sub(CHROME_ROWS)
    }

    pub fn find_bar(&self) -> Option<&TextControl> {
        self.document.control(self.find_bar)
    }

    pub fn find_bar_mut(&mut self) -> Option<&mut TextControl> {
        self.document.control_mut(self.find_bar)
    }

    pub fn focus_find_bar(&mut self) {
        self.document.focus(self.find_bar);
        self.mode = Mode::Find;
    }

    pub fn focus_document(&mut self) {
        self.document.blur();
        self.mode = Mode::Document;
    }

    /// Selects the next match of the find bar's text after the current
    /// selection.
    pub fn find_next(&mut self) {
        let query = match self.find_bar() {
            Some(bar) if !bar.value().is_empty() => bar.value().to_string(),
            _ => return,
        };
        let from = self.document.selection().map(|s| s.end()).unwrap_or(0);
        match self.document.find(&query, from) {
            Some(start) => {
                let end = start + query.chars().count();
                self.document.select(start, end);
                self.document.scroll_into_view(start);
            }
            None => self.set_status(format!("Not found: {query}")),
        }
    }

    pub fn run_native_action(&mut self, action: NativeAction) {
        match action {
            NativeAction::SelectAll => self.document.select_all(),
            NativeAction::ClearSelection => self.document.clear_selection(),
        }
    }

    /// Starts the primary clipboard write. The menu must already be hidden.
    pub fn start_copy(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        let (tx, rx) = oneshot::channel();
        let payload = text.clone();
        let use_system = self.use_system_clipboard;
        self.runtime.spawn(async move {
            let result = if use_system {
                let clipboard = SystemClipboard;
                clipboard.write_text(&payload).await
            } else {
                let clipboard = DisabledClipboard;
                clipboard.write_text(&payload).await
            };
            let _ = tx.send(result);
        });
        debug!(len = text.len(), "clipboard write issued");
        self.pending_copies.push(PendingCopy { text, result: rx });
    }

    pub fn has_pending_copies(&self) -> bool {
        !self.pending_copies.is_empty()
    }

    /// Text of each clipboard write still in flight, oldest first.
    pub fn pending_copy_texts(&self) -> impl Iterator<Item = &str> {
        self.pending_copies.iter().map(|pending| pending.text.as_str())
    }

    /// Finishes clipboard writes that have resolved, running the terminal
    /// fallback for the ones that failed.
    pub fn poll_copies(&mut self) {
        let mut still_pending = Vec::new();
        for mut pending in std::mem::take(&mut self.pending_copies) {
            let result = match pending.result.try_recv() {
                Ok(result) => result,
                Err(oneshot::error::TryRecvError::Empty) => {
                    still_pending.push(pending);
                    continue;
                }
                Err(oneshot::error::TryRecvError::Closed) => Err(ClipboardError::Rejected(
                    "clipboard task ended without a result".to_string(),
                )),
            };
            self.finish_copy(&pending.text, result);
        }
        self.pending_copies = still_pending;
    }

    fn finish_copy(&mut self, text: &str, result: Result<(), ClipboardError>) -> CopyOutcome {
        let mut host = TerminalCopyHost::new(&mut self.document, &mut self.copy_output);
        let outcome = complete_copy(result, &mut host, text);
        // Not surfaced to the user.
        info!(?outcome, "copy finished");
        outcome
    }

    /// Releases the menu's listeners. Safe to call more than once.
    pub fn unmount_menu(&mut self) -> Result<()> {
        if let Some(menu) = self.menu.take() {
            menu.unmount(&mut self.registry)?;
        }
        Ok(())
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    pub fn clear_expired_status_message(&mut self) {
        if let Some((_, at)) = &self.status_message {
            if at.elapsed() >= STATUS_MESSAGE_TIMEOUT {
                self.status_message = None;
            }
        }
    }
}
