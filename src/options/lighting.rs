use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the lighting equation is evaluated.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ShadingModel {
    /// Per-fragment lighting.
    #[default]
    Phong,
    /// Per-vertex lighting, interpolated across the triangle.
    Gouraud,
}

impl ShadingModel {
    /// The other model.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Phong => Self::Gouraud,
            Self::Gouraud => Self::Phong,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Point light, material, and shading parameters for the lit scenes.
pub struct LightingOptions {
    /// Per-fragment or per-vertex lighting.
    #[schemars(title = "Shading")]
    pub shading: ShadingModel,
    /// World-space light position.
    #[schemars(skip)]
    pub light_position: [f32; 3],
    /// Light color (also the lamp cube's color).
    #[schemars(skip)]
    pub light_color: [f32; 3],
    /// Flat object color used by the color-lighting scene.
    #[schemars(skip)]
    pub object_color: [f32; 3],
    /// Ambient term of the light (lighting-maps scene).
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ambient: f32,
    /// Diffuse term of the light (lighting-maps scene).
    #[schemars(title = "Diffuse", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub diffuse: f32,
    /// Specular term of the light (lighting-maps scene).
    #[schemars(title = "Specular", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub specular: f32,
    /// Ambient strength of the flat-color scene.
    #[schemars(skip)]
    pub ambient_strength: f32,
    /// Specular strength of the flat-color scene.
    #[schemars(skip)]
    pub specular_strength: f32,
    /// Specular exponent.
    #[schemars(title = "Shininess", range(min = 1.0, max = 256.0), extend("step" = 1.0))]
    pub shininess: f32,
    /// Emission map strength.
    #[schemars(title = "Emission", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub emission: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            shading: ShadingModel::Phong,
            light_position: [1.2, 1.0, 2.0],
            light_color: [1.0, 1.0, 1.0],
            object_color: [1.0, 0.5, 0.31],
            ambient: 0.2,
            diffuse: 0.5,
            specular: 1.0,
            ambient_strength: 0.1,
            specular_strength: 0.5,
            shininess: 0.5 * 128.0,
            emission: 0.1,
        }
    }
}
