use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Line Trails", inline)]
#[serde(default)]
/// Parameters of the line-trail framebuffer effect.
pub struct TrailOptions {
    /// Number of orbiting line segments.
    #[schemars(title = "Lines", range(min = 1, max = 10000))]
    pub line_count: u32,
    /// Angular speed multiplier.
    #[schemars(title = "Speed", range(min = -10.0, max = 10.0), extend("step" = 1.0))]
    pub speed: f32,
    /// Opacity of the fade quad drawn over the trail target each frame.
    #[schemars(title = "Fade Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub opacity: f32,
    /// Brightness below which trail pixels are discarded on composite.
    #[schemars(title = "Floor", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub floor: f32,
    /// Smallest orbit radius.
    #[schemars(skip)]
    pub min_radius: f32,
    /// Largest orbit radius.
    #[schemars(skip)]
    pub max_radius: f32,
    /// Fixed RNG seed for reproducible layouts.
    #[schemars(skip)]
    pub seed: Option<u64>,
}

impl TrailOptions {
    /// Raise `line_count` to at least one line; an empty line mesh has
    /// nothing to bind.
    pub(crate) fn clamp_line_count(&mut self) {
        if self.line_count == 0 {
            log::warn!("trails.line_count = 0 raised to 1");
            self.line_count = 1;
        }
    }
}

impl Default for TrailOptions {
    fn default() -> Self {
        Self {
            line_count: 10,
            speed: 1.0,
            opacity: 0.1,
            floor: 0.1,
            min_radius: 0.1,
            max_radius: 1.0,
            seed: None,
        }
    }
}
