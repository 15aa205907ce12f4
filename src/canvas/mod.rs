//! The canvas state machine: workspaces, windows, viewport, and the
//! keyboard tab navigator. Everything here is synchronous and free of I/O;
//! the reactor actor drives it.

mod engine;
mod navigator;
mod viewport;

pub use engine::{CanvasCommand, CanvasEngine, EventResponse, CONFIRM_PHRASE};
pub use navigator::TabNavigator;
pub use viewport::{zoom_about_center, PanSession};
