//! Input handling: event types, key actions, mouse tracking, and the
//! processor that converts window events into camera movement and
//! commands.

/// Platform-agnostic input events.
pub mod event;
/// Bindable key actions.
pub mod keyboard;
/// Cursor tracking with first-sample suppression.
pub(crate) mod mouse;
/// Converts events into commands and held-key movement.
pub mod processor;

pub use event::InputEvent;
pub use keyboard::KeyAction;
pub use processor::{Command, HeldKeys, InputProcessor};
