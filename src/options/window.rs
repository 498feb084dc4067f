use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Window", inline)]
#[serde(default)]
/// Window size, presentation, and frame pacing.
pub struct WindowOptions {
    /// Window title.
    #[schemars(skip)]
    pub title: String,
    /// Initial inner width in logical pixels.
    #[schemars(skip)]
    pub width: u32,
    /// Initial inner height in logical pixels.
    #[schemars(skip)]
    pub height: u32,
    /// Wait for vertical sync on present.
    #[schemars(title = "VSync")]
    pub vsync: bool,
    /// Frame cap (0 = unlimited).
    #[schemars(title = "Target FPS", range(min = 0, max = 240))]
    pub target_fps: u32,
    /// Background color for scenes that clear to a solid color.
    #[schemars(skip)]
    pub clear_color: [f32; 3],
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "glearn".into(),
            width: 800,
            height: 600,
            vsync: true,
            target_fps: 0,
            clear_color: [0.2, 0.3, 0.3],
        }
    }
}
