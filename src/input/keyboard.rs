use serde::{Deserialize, Serialize};

use crate::camera::CameraMovement;

/// Actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML stays readable:
/// ```toml
/// [keybindings.bindings]
/// KeyW = "move_forward"
/// Escape = "exit"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Hold to fly forward.
    MoveForward,
    /// Hold to fly backward.
    MoveBackward,
    /// Hold to strafe left.
    MoveLeft,
    /// Hold to strafe right.
    MoveRight,
    /// Hold to rise along world up.
    MoveUp,
    /// Hold to sink along world up.
    MoveDown,
    /// Close the window (fires on release).
    Exit,
    /// Grab or release the mouse cursor.
    ToggleCursorGrab,
    /// Switch between Phong and Gouraud shading.
    ToggleShading,
    /// Raise the trail fade opacity.
    IncreaseOpacity,
    /// Lower the trail fade opacity.
    DecreaseOpacity,
    /// Speed up the trails.
    IncreaseSpeed,
    /// Slow down the trails.
    DecreaseSpeed,
    /// Raise the trail composite floor.
    RaiseFloor,
    /// Lower the trail composite floor.
    LowerFloor,
}

impl KeyAction {
    /// The camera direction this action drives while held, if any.
    #[must_use]
    pub fn movement(self) -> Option<CameraMovement> {
        match self {
            Self::MoveForward => Some(CameraMovement::Forward),
            Self::MoveBackward => Some(CameraMovement::Backward),
            Self::MoveLeft => Some(CameraMovement::Left),
            Self::MoveRight => Some(CameraMovement::Right),
            Self::MoveUp => Some(CameraMovement::Up),
            Self::MoveDown => Some(CameraMovement::Down),
            _ => None,
        }
    }
}
