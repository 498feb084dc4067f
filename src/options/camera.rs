use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::core::{
    DEFAULT_FOV, DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED,
    DEFAULT_YAW, MAX_FOV, MIN_FOV,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Fly camera start state, projection, and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 1.0, max = 45.0), extend("step" = 1.0))]
    pub fov: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Movement speed in world units per second.
    #[schemars(title = "Move Speed", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub move_speed: f32,
    /// Degrees of rotation per pixel of mouse travel.
    #[schemars(title = "Mouse Sensitivity", range(min = 0.01, max = 2.0), extend("step" = 0.01))]
    pub mouse_sensitivity: f32,
    /// Keep pitch inside [-89, 89] degrees.
    #[schemars(title = "Clamp Pitch")]
    pub clamp_pitch: bool,
    /// Starting eye position.
    #[schemars(skip)]
    pub position: [f32; 3],
    /// Global up direction (normalized on use).
    #[schemars(skip)]
    pub world_up: [f32; 3],
    /// Starting heading in degrees.
    #[schemars(skip)]
    pub yaw: f32,
    /// Starting elevation in degrees.
    #[schemars(skip)]
    pub pitch: f32,
    /// Narrowest zoom.
    #[schemars(skip)]
    pub min_fov: f32,
    /// Widest zoom.
    #[schemars(skip)]
    pub max_fov: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV,
            znear: 0.1,
            zfar: 100.0,
            move_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            clamp_pitch: true,
            position: [0.0, 0.0, 3.0],
            world_up: [0.0, 1.0, 0.0],
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            min_fov: MIN_FOV,
            max_fov: MAX_FOV,
        }
    }
}
