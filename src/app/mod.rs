pub mod event;
pub mod mode;
pub mod state;

pub use mode::Mode;
pub use state::{AppState, NativeAction, NativeMenu};
