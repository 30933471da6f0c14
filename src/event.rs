use crate::document::NodeId;
use crate::geometry::{Point, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Auxiliary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Char(char),
    Other,
}

/// Host input, already hit-tested: `target` is the control under the
/// pointer, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ContextMenu { point: Point, target: Option<NodeId> },
    PointerDown { point: Point, button: MouseButton, target: Option<NodeId> },
    KeyDown { key: Key },
    Scroll,
    Resize(Viewport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ContextMenu,
    PointerDown,
    KeyDown,
    Scroll,
    Resize,
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::ContextMenu { .. } => EventKind::ContextMenu,
            InputEvent::PointerDown { .. } => EventKind::PointerDown,
            InputEvent::KeyDown { .. } => EventKind::KeyDown,
            InputEvent::Scroll => EventKind::Scroll,
            InputEvent::Resize(_) => EventKind::Resize,
        }
    }
}

/// What a listener did to the event it observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl Dispatch {
    pub fn proceed() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            default_prevented: true,
            propagation_stopped: true,
        }
    }
}
