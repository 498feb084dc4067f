//! WGSL sources compiled into the binary.

/// A WGSL source embedded at build time, addressed by file name.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedShader {
    /// File name, also used to look up overrides on disk.
    pub name: &'static str,
    /// WGSL source text.
    pub source: &'static str,
}

macro_rules! embed {
    ($name:literal) => {
        EmbeddedShader {
            name: $name,
            source: include_str!(concat!("../../assets/shaders/", $name)),
        }
    };
}

/// `glearn::camera`: the camera uniform struct.
pub const CAMERA_MODULE: EmbeddedShader = embed!("modules/camera.wgsl");
/// `glearn::lighting`: Phong diffuse/specular factors.
pub const LIGHTING_MODULE: EmbeddedShader = embed!("modules/lighting.wgsl");

/// Flat-colored rectangle and triangle.
pub const TRIANGLE: EmbeddedShader = embed!("triangle.wgsl");
/// Screen-space textured quad.
pub const TEXTURED_QUAD: EmbeddedShader = embed!("textured_quad.wgsl");
/// Textured cubes seen through the camera.
pub const CUBES: EmbeddedShader = embed!("cubes.wgsl");
/// Phong and Gouraud shaded object.
pub const LIGHTING: EmbeddedShader = embed!("lighting.wgsl");
/// Unlit light-source cube.
pub const LAMP: EmbeddedShader = embed!("lamp.wgsl");
/// Diffuse, specular, and emission mapped object.
pub const LIGHTING_MAPS: EmbeddedShader = embed!("lighting_maps.wgsl");
/// Full-screen darkening pass for the trail target.
pub const FADE: EmbeddedShader = embed!("fade.wgsl");
/// Orbiting line segments.
pub const LINE_TRAIL: EmbeddedShader = embed!("line_trail.wgsl");
/// Copies the trail target to the surface above a brightness floor.
pub const TRAIL_COMPOSITE: EmbeddedShader = embed!("trail_composite.wgsl");

/// Importable modules, registered with the composer before any scene shader.
pub const SHARED_MODULES: [EmbeddedShader; 2] = [CAMERA_MODULE, LIGHTING_MODULE];

/// Every scene shader.
pub const SCENE_SHADERS: [EmbeddedShader; 9] = [
    TRIANGLE,
    TEXTURED_QUAD,
    CUBES,
    LIGHTING,
    LAMP,
    LIGHTING_MAPS,
    FADE,
    LINE_TRAIL,
    TRAIL_COMPOSITE,
];
