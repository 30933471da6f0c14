use super::evaluator::evaluate;
use super::listeners::{ListenerError, ListenerId, ListenerRegistry, ListenerTarget, Phase};
use super::position::{menu_rect, MenuMetrics};
use super::state::{MenuState, Visibility};
use crate::document::Document;
use crate::event::{Dispatch, EventKind, InputEvent, Key, MouseButton};
use crate::geometry::{Point, Rect, Viewport};
use tracing::debug;

/// What the host should do after the menu saw an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuOutcome {
    pub dispatch: Dispatch,
    /// Text to hand to the clipboard writer. The menu is already hidden
    /// when this is set.
    pub copy: Option<String>,
}

impl MenuOutcome {
    fn proceed() -> Self {
        Self::default()
    }
}

/// The selection-aware context menu.
///
/// Listeners are registered by [`ContextMenu::mount`] and released by
/// [`ContextMenu::unmount`], independent of whether the menu is showing.
#[derive(Debug)]
pub struct ContextMenu {
    state: MenuState,
    metrics: MenuMetrics,
    listeners: Vec<ListenerId>,
}

impl ContextMenu {
    pub fn mount(registry: &mut ListenerRegistry, metrics: MenuMetrics) -> Self {
        let listeners = vec![
            registry.add(ListenerTarget::Document, EventKind::ContextMenu, Phase::Capture),
            registry.add(ListenerTarget::Document, EventKind::PointerDown, Phase::Capture),
            registry.add(ListenerTarget::Document, EventKind::KeyDown, Phase::Capture),
            registry.add(ListenerTarget::Window, EventKind::Resize, Phase::Bubble),
            registry.add(ListenerTarget::Document, EventKind::Scroll, Phase::Capture),
        ];
        debug!(count = listeners.len(), "context menu mounted");
        Self {
            state: MenuState::default(),
            metrics,
            listeners,
        }
    }

    /// Detaches every listener this menu registered.
    pub fn unmount(self, registry: &mut ListenerRegistry) -> Result<(), ListenerError> {
        let mut result = Ok(());
        for id in self.listeners {
            if let Err(err) = registry.remove(id) {
                result = Err(err);
            }
        }
        debug!("context menu unmounted");
        result
    }

    pub fn owns(&self, id: ListenerId) -> bool {
        self.listeners.contains(&id)
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn visibility(&self) -> Visibility {
        self.state.visibility()
    }

    pub fn metrics(&self) -> MenuMetrics {
        self.metrics
    }

    /// Region the menu currently occupies, if shown.
    pub fn rendered_rect(&self, viewport: Viewport) -> Option<Rect> {
        self.state.visible.then(|| {
            menu_rect(
                Point::new(self.state.x, self.state.y),
                viewport,
                self.metrics,
            )
        })
    }

    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        document: &Document,
        viewport: Viewport,
    ) -> MenuOutcome {
        match event {
            InputEvent::ContextMenu { point, target } => {
                let evaluation = evaluate(*point, *target, document);
                if evaluation.intercept && self.state.open(point.x, point.y, evaluation.text) {
                    debug!(x = point.x, y = point.y, "context menu shown");
                    MenuOutcome {
                        dispatch: Dispatch::consumed(),
                        copy: None,
                    }
                } else {
                    self.close();
                    MenuOutcome::proceed()
                }
            }
            InputEvent::PointerDown { point, button, .. } => {
                if *button != MouseButton::Primary {
                    return MenuOutcome::proceed();
                }
                match self.rendered_rect(viewport) {
                    Some(rect) if rect.contains(*point) => MenuOutcome {
                        dispatch: Dispatch::consumed(),
                        copy: self.activate_copy(),
                    },
                    Some(_) => {
                        self.close();
                        MenuOutcome::proceed()
                    }
                    None => MenuOutcome::proceed(),
                }
            }
            InputEvent::KeyDown { key: Key::Escape } => {
                if self.close() {
                    MenuOutcome {
                        dispatch: Dispatch::consumed(),
                        copy: None,
                    }
                } else {
                    MenuOutcome::proceed()
                }
            }
            InputEvent::KeyDown { .. } => MenuOutcome::proceed(),
            InputEvent::Scroll | InputEvent::Resize(_) => {
                self.close();
                MenuOutcome::proceed()
            }
        }
    }

    /// Hides the menu. Returns false when it was already hidden.
    pub fn close(&mut self) -> bool {
        let changed = self.state.close();
        if changed {
            debug!("context menu hidden");
        }
        changed
    }

    /// The Copy action: hides the menu first, then hands back the text to
    /// copy. Nothing to copy when the menu was not showing.
    pub fn activate_copy(&mut self) -> Option<String> {
        if !self.close() {
            return None;
        }
        Some(self.state.text.clone())
    }
}
