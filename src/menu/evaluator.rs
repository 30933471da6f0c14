use crate::document::{Document, NodeId};
use crate::geometry::Point;
use tracing::debug;

/// Whether a right-click should be intercepted, and what it offers to copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Evaluation {
    pub intercept: bool,
    pub text: String,
}

impl Evaluation {
    fn intercept(text: String) -> Self {
        Self { intercept: true, text }
    }

    fn pass() -> Self {
        Self::default()
    }
}

/// Decides whether a context-menu gesture at `point` landed on a selection.
///
/// The document selection wins when the point falls inside one of its client
/// rects. If the rects cannot be computed the selection is offered anyway.
/// Failing that, a text control under the pointer with a non-collapsed
/// selection is offered.
pub fn evaluate(point: Point, target: Option<NodeId>, document: &Document) -> Evaluation {
    if let Some(selection) = document.selection() {
        let text = document.selection_text().trim().to_string();
        if !selection.is_collapsed() && !text.is_empty() {
            match document.selection_client_rects() {
                Ok(rects) => {
                    if rects.iter().any(|rect| rect.contains(point)) {
                        return Evaluation::intercept(text);
                    }
                }
                Err(err) => {
                    debug!(error = %err, "selection geometry unavailable, intercepting anyway");
                    return Evaluation::intercept(text);
                }
            }
        }
    }

    if let Some(control) = target.and_then(|id| document.control(id)) {
        if control.has_selection() {
            let text = control.selected_text().trim().to_string();
            if !text.is_empty() {
                return Evaluation::intercept(text);
            }
        }
    }

    Evaluation::pass()
}
