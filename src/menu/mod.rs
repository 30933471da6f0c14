pub mod controller;
pub mod evaluator;
pub mod listeners;
pub mod position;
pub mod state;

pub use controller::{ContextMenu, MenuOutcome};
pub use evaluator::{evaluate, Evaluation};
pub use listeners::{ListenerError, ListenerId, ListenerRegistry, ListenerTarget, Phase};
pub use position::{clamp_position, menu_rect, MenuMetrics};
pub use state::{MenuState, Visibility};
