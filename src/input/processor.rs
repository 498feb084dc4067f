//! Converts platform events into viewer commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! held movement keys, whether mouse-look is active). Continuous movement
//! is not a command: held keys are applied to the camera once per frame
//! with that frame's delta time.

use super::event::InputEvent;
use super::keyboard::KeyAction;
use super::mouse::MouseTracker;
use crate::camera::{Camera, CameraMovement};

/// Discrete results of input processing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Rotate the camera by a mouse offset (pixels, y already inverted).
    Look {
        /// Horizontal offset.
        x: f32,
        /// Vertical offset.
        y: f32,
    },
    /// Change the field of view.
    Zoom {
        /// Scroll amount (positive = zoom in).
        delta: f32,
    },
    /// Close the window.
    Exit,
    /// Grab or release the cursor.
    ToggleCursorGrab,
    /// A scene-specific action (shading, trail tuning, ...).
    Scene(KeyAction),
}

/// Set of movement directions whose keys are currently held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: [bool; CameraMovement::ALL.len()],
}

impl HeldKeys {
    fn slot(movement: CameraMovement) -> usize {
        match movement {
            CameraMovement::Forward => 0,
            CameraMovement::Backward => 1,
            CameraMovement::Left => 2,
            CameraMovement::Right => 3,
            CameraMovement::Up => 4,
            CameraMovement::Down => 5,
        }
    }

    /// Mark a direction as held or released.
    pub fn set(&mut self, movement: CameraMovement, held: bool) {
        self.held[Self::slot(movement)] = held;
    }

    /// Whether a direction is held.
    #[must_use]
    pub fn is_held(&self, movement: CameraMovement) -> bool {
        self.held[Self::slot(movement)]
    }

    /// Release every direction.
    pub fn clear(&mut self) {
        self.held = Default::default();
    }

    /// Held directions in [`CameraMovement::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = CameraMovement> + '_ {
        CameraMovement::ALL
            .into_iter()
            .filter(|movement| self.is_held(*movement))
    }
}

/// Converts [`InputEvent`]s into [`Command`]s and drives held-key movement.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input.handle_event(event) {
///     viewer.execute(cmd);
/// }
/// // once per frame:
/// input.apply_held_movement(camera, dt);
/// ```
pub struct InputProcessor {
    mouse: MouseTracker,
    held: HeldKeys,
    look_enabled: bool,
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl InputProcessor {
    /// Processor with mouse-look enabled and no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mouse: MouseTracker::new(),
            held: HeldKeys::default(),
            look_enabled: true,
        }
    }

    /// Whether cursor motion turns the camera.
    #[must_use]
    pub fn look_enabled(&self) -> bool {
        self.look_enabled
    }

    /// Enable or disable mouse-look. The next cursor sample after a change
    /// never produces an offset.
    pub fn set_look_enabled(&mut self, enabled: bool) {
        self.look_enabled = enabled;
        self.mouse.reset();
    }

    /// Currently held movement keys.
    #[must_use]
    pub fn held(&self) -> &HeldKeys {
        &self.held
    }

    /// Process one event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::Key { action, pressed } => {
                self.handle_key(action, pressed)
            }
            InputEvent::CursorMoved { x, y } => {
                let (x_offset, y_offset) = self.mouse.handle_position(x, y)?;
                self.look_enabled.then_some(Command::Look {
                    x: x_offset,
                    y: y_offset,
                })
            }
            InputEvent::Scroll { delta } => Some(Command::Zoom { delta }),
            InputEvent::FocusLost => {
                self.held.clear();
                self.mouse.reset();
                None
            }
        }
    }

    fn handle_key(&mut self, action: KeyAction, pressed: bool) -> Option<Command> {
        if let Some(movement) = action.movement() {
            self.held.set(movement, pressed);
            return None;
        }

        match action {
            // Exit fires on release so the key-up doesn't leak elsewhere.
            KeyAction::Exit => (!pressed).then_some(Command::Exit),
            KeyAction::ToggleCursorGrab => {
                pressed.then_some(Command::ToggleCursorGrab)
            }
            other => pressed.then_some(Command::Scene(other)),
        }
    }

    /// Move the camera along every held direction for `dt` seconds.
    pub fn apply_held_movement(&self, camera: &mut Camera, dt: f32) {
        for movement in self.held.iter() {
            camera.apply_movement(movement, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn key(action: KeyAction, pressed: bool) -> InputEvent {
        InputEvent::Key { action, pressed }
    }

    #[test]
    fn held_forward_moves_camera() {
        let mut input = InputProcessor::new();
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y);
        assert_eq!(input.handle_event(key(KeyAction::MoveForward, true)), None);

        input.apply_held_movement(&mut camera, 1.0);
        assert!((camera.position() - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-4);

        let _ = input.handle_event(key(KeyAction::MoveForward, false));
        input.apply_held_movement(&mut camera, 1.0);
        assert!((camera.position() - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-4);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut input = InputProcessor::new();
        let mut camera = Camera::new(Vec3::ZERO, Vec3::Y);
        let _ = input.handle_event(key(KeyAction::MoveLeft, true));
        let _ = input.handle_event(key(KeyAction::MoveRight, true));
        input.apply_held_movement(&mut camera, 0.5);
        assert!(camera.position().length() < 1e-5);
    }

    #[test]
    fn exit_fires_on_release_only() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(key(KeyAction::Exit, true)), None);
        assert_eq!(
            input.handle_event(key(KeyAction::Exit, false)),
            Some(Command::Exit)
        );
    }

    #[test]
    fn scene_actions_fire_on_press() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(key(KeyAction::IncreaseOpacity, true)),
            Some(Command::Scene(KeyAction::IncreaseOpacity))
        );
        assert_eq!(
            input.handle_event(key(KeyAction::IncreaseOpacity, false)),
            None
        );
    }

    #[test]
    fn cursor_produces_inverted_look() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::CursorMoved { x: 400.0, y: 300.0 }),
            None
        );
        assert_eq!(
            input.handle_event(InputEvent::CursorMoved { x: 420.0, y: 250.0 }),
            Some(Command::Look { x: 20.0, y: 50.0 })
        );
    }

    #[test]
    fn look_disabled_swallows_motion() {
        let mut input = InputProcessor::new();
        input.set_look_enabled(false);
        let _ = input.handle_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        assert_eq!(
            input.handle_event(InputEvent::CursorMoved { x: 10.0, y: 0.0 }),
            None
        );
        input.set_look_enabled(true);
        assert_eq!(
            input.handle_event(InputEvent::CursorMoved { x: 90.0, y: 0.0 }),
            None
        );
    }

    #[test]
    fn focus_lost_releases_keys() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(key(KeyAction::MoveUp, true));
        assert!(input.held().is_held(CameraMovement::Up));
        let _ = input.handle_event(InputEvent::FocusLost);
        assert_eq!(input.held().iter().count(), 0);
    }

    #[test]
    fn scroll_zooms() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta: 1.5 }),
            Some(Command::Zoom { delta: 1.5 })
        );
    }
}
