//! Best-effort clipboard writes.
//!
//! The asynchronous system clipboard is tried first. When it fails the text
//! goes through a scratch element in the host document and the host's
//! synchronous copy command. Neither tier reports failure to the user.

pub mod osc52;

use arboard::Clipboard;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, warn};

pub use osc52::TerminalCopyHost;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
    #[error("copy command failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The primary tier: an asynchronous clipboard write.
pub trait AsyncClipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> + Send;
}

/// System clipboard through arboard, run on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl AsyncClipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> + Send {
        let text = text.to_string();
        async move {
            let write = tokio::task::spawn_blocking(move || -> Result<(), ClipboardError> {
                let mut clipboard =
                    Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
                clipboard
                    .set_text(text)
                    .map_err(|e| ClipboardError::Rejected(e.to_string()))
            });
            match write.await {
                Ok(result) => result,
                Err(e) => Err(ClipboardError::Rejected(e.to_string())),
            }
        }
    }
}

/// Always rejects, so every copy takes the fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledClipboard;

impl AsyncClipboard for DisabledClipboard {
    fn write_text(&self, _text: &str) -> impl Future<Output = Result<(), ClipboardError>> + Send {
        std::future::ready(Err(ClipboardError::Unavailable(
            "system clipboard disabled".to_string(),
        )))
    }
}

/// A document that can hold a transient text element and run a synchronous
/// copy command on whatever is selected.
pub trait ScratchHost {
    type Handle: Copy;

    /// Inserts an off-screen, read-only element holding `text`.
    fn mount_scratch(&mut self, text: &str) -> Self::Handle;
    /// Focuses the element and selects all of its content.
    fn select_scratch(&mut self, handle: Self::Handle);
    /// Copies the current selection. `Ok(false)` when nothing was copied.
    fn exec_copy(&mut self) -> Result<bool, ClipboardError>;
    fn unmount_scratch(&mut self, handle: Self::Handle);
}

/// Keeps a scratch element in the document for as long as it lives.
struct ScratchGuard<'a, H: ScratchHost> {
    host: &'a mut H,
    handle: H::Handle,
}

impl<'a, H: ScratchHost> ScratchGuard<'a, H> {
    fn acquire(host: &'a mut H, text: &str) -> Self {
        let handle = host.mount_scratch(text);
        Self { host, handle }
    }

    fn copy(&mut self) -> Result<bool, ClipboardError> {
        self.host.select_scratch(self.handle);
        self.host.exec_copy()
    }
}

impl<H: ScratchHost> Drop for ScratchGuard<'_, H> {
    fn drop(&mut self) {
        self.host.unmount_scratch(self.handle);
    }
}

/// Synchronous fallback. The scratch element is removed on every exit path.
pub fn fallback_copy<H: ScratchHost>(host: &mut H, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let mut scratch = ScratchGuard::acquire(host, text);
    match scratch.copy() {
        Ok(copied) => copied,
        Err(err) => {
            warn!(error = %err, "fallback copy failed");
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Empty input, nothing attempted.
    Skipped,
    Primary,
    Fallback { copied: bool },
}

/// Settles a copy once the asynchronous write has resolved: a failed write
/// goes through the scratch-element fallback exactly once.
pub fn complete_copy<H: ScratchHost>(
    result: Result<(), ClipboardError>,
    host: &mut H,
    text: &str,
) -> CopyOutcome {
    if text.is_empty() {
        return CopyOutcome::Skipped;
    }
    match result {
        Ok(()) => {
            debug!(len = text.len(), "copied via system clipboard");
            CopyOutcome::Primary
        }
        Err(err) => {
            debug!(error = %err, "system clipboard failed, using fallback");
            CopyOutcome::Fallback {
                copied: fallback_copy(host, text),
            }
        }
    }
}

/// Writes `text` to the clipboard, falling back to the scratch-element copy
/// when the asynchronous write fails. Never errors.
///
/// There is no timeout: if the primary write never resolves, neither does
/// this future. Callers finish any UI changes before awaiting it.
pub async fn copy_text<C, H>(clipboard: &C, host: &mut H, text: &str) -> CopyOutcome
where
    C: AsyncClipboard,
    H: ScratchHost,
{
    if text.is_empty() {
        return CopyOutcome::Skipped;
    }
    let result = clipboard.write_text(text).await;
    complete_copy(result, host, text)
}
