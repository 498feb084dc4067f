use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Filesystem locations of shaders and textures.
///
/// Missing textures fall back to a generated checkerboard; shaders fall
/// back to the copies embedded in the binary.
pub struct AssetOptions {
    /// Directory searched for `*.wgsl` overrides before the embedded copies.
    pub shader_dir: Option<PathBuf>,
    /// Texture for the textured quad and camera cubes.
    pub texture: PathBuf,
    /// Diffuse map of the lighting-maps scene.
    pub diffuse_map: PathBuf,
    /// Specular map of the lighting-maps scene.
    pub specular_map: PathBuf,
    /// Emission map of the lighting-maps scene.
    pub emission_map: PathBuf,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            shader_dir: None,
            texture: PathBuf::from("assets/textures/7a9.jpg"),
            diffuse_map: PathBuf::from("assets/textures/container2.png"),
            specular_map: PathBuf::from(
                "assets/textures/container2_specular.png",
            ),
            emission_map: PathBuf::from("assets/textures/matrix.jpg"),
        }
    }
}
