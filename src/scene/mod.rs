//! Demo scenes, one per rendering exercise.
//!
//! Every scene implements [`Scene`] and is constructed through
//! [`SceneKind::build`]. Scenes that look through the fly camera bind the
//! shared camera uniform at group 0; the viewer owns the camera and passes
//! its bind group in each [`Frame`].

/// Spinning textured cubes seen through the fly camera.
pub mod camera_cubes;
/// Vertex types and static meshes shared by the scenes.
pub mod geometry;
/// Phong/Gouraud lit cube with a lamp.
pub mod lighting;
/// Diffuse, specular, and emission maps.
pub mod lighting_maps;
/// Orbiting lines with fading trails.
pub mod line_trails;
/// A single textured rectangle.
pub mod textured_quad;
/// Color-cycled rectangle and a flat triangle.
pub mod triangles;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::GlearnError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::DepthTexture;
use crate::input::KeyAction;
use crate::options::Options;

/// Everything a scene needs at construction time.
pub struct SceneInit<'a> {
    /// Device, queue, and surface format.
    pub context: &'a RenderContext,
    /// Composer for the scene's shaders.
    pub shaders: &'a mut ShaderComposer,
    /// Layout of the camera bind group (group 0).
    pub camera_layout: &'a wgpu::BindGroupLayout,
    /// Runtime options.
    pub options: &'a Options,
}

/// Per-frame render inputs.
pub struct Frame<'a> {
    /// Encoder the scene records its passes into.
    pub encoder: &'a mut wgpu::CommandEncoder,
    /// Surface texture view for this frame.
    pub target: &'a wgpu::TextureView,
    /// Camera bind group (group 0).
    pub camera: &'a wgpu::BindGroup,
    /// Background color.
    pub clear_color: wgpu::Color,
}

/// A drawable demo.
pub trait Scene {
    /// Advance animation by `dt` seconds and upload changed uniforms.
    fn update(&mut self, queue: &wgpu::Queue, camera: &Camera, dt: f32);

    /// Record this frame's render passes.
    fn render(&self, frame: &mut Frame<'_>);

    /// React to a new surface size.
    fn resize(&mut self, _device: &wgpu::Device, _width: u32, _height: u32) {}

    /// React to a scene-specific key action. Unhandled actions are ignored.
    fn handle_action(&mut self, _action: KeyAction) {}
}

/// Selectable scenes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Indexed rectangle with a time-cycled color and a translucent
    /// triangle.
    Triangles,
    /// A textured rectangle.
    TexturedQuad,
    /// Textured cubes seen through the fly camera.
    CameraCubes,
    /// Flat-colored cube under a point light, Phong or Gouraud.
    #[default]
    Lighting,
    /// Cube with diffuse, specular, and emission maps.
    LightingMaps,
    /// Orbiting lines leaving fading trails in an off-screen target.
    LineTrails,
}

impl SceneKind {
    /// Every scene, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Triangles,
        Self::TexturedQuad,
        Self::CameraCubes,
        Self::Lighting,
        Self::LightingMaps,
        Self::LineTrails,
    ];

    /// Command-line name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Triangles => "triangles",
            Self::TexturedQuad => "textured_quad",
            Self::CameraCubes => "camera_cubes",
            Self::Lighting => "lighting",
            Self::LightingMaps => "lighting_maps",
            Self::LineTrails => "line_trails",
        }
    }

    /// Whether the scene is viewed through the fly camera.
    #[must_use]
    pub fn uses_camera(self) -> bool {
        matches!(self, Self::CameraCubes | Self::Lighting | Self::LightingMaps)
    }

    /// Construct the scene.
    ///
    /// # Errors
    ///
    /// Returns [`GlearnError::Shader`] if one of the scene's shaders fails
    /// to compose.
    pub fn build(
        self,
        init: &mut SceneInit<'_>,
    ) -> Result<Box<dyn Scene>, GlearnError> {
        log::info!("building scene {self}");
        Ok(match self {
            Self::Triangles => Box::new(triangles::TrianglesScene::new(init)?),
            Self::TexturedQuad => {
                Box::new(textured_quad::TexturedQuadScene::new(init)?)
            }
            Self::CameraCubes => {
                Box::new(camera_cubes::CameraCubesScene::new(init)?)
            }
            Self::Lighting => Box::new(lighting::LightingScene::new(init)?),
            Self::LightingMaps => {
                Box::new(lighting_maps::LightingMapsScene::new(init)?)
            }
            Self::LineTrails => {
                Box::new(line_trails::LineTrailsScene::new(init)?)
            }
        })
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = GlearnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> =
                    Self::ALL.iter().map(|kind| kind.name()).collect();
                GlearnError::Viewer(format!(
                    "unknown scene `{s}` (expected one of: {})",
                    names.join(", ")
                ))
            })
    }
}

/// Begin a single-target pass, optionally with a cleared depth attachment.
pub(crate) fn begin_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    load: wgpu::LoadOp<wgpu::Color>,
    depth: Option<&DepthTexture>,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            depth_slice: None,
            resolve_target: None,
            ops: wgpu::Operations {
                load,
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: depth.map(DepthTexture::attachment),
        timestamp_writes: None,
        occlusion_query_set: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in SceneKind::ALL {
            assert_eq!(kind.name().parse::<SceneKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn unknown_name_lists_choices() {
        let err = "teapot".parse::<SceneKind>().unwrap_err().to_string();
        assert!(err.contains("teapot"));
        assert!(err.contains("line_trails"));
    }

    #[test]
    fn default_is_lighting() {
        assert_eq!(SceneKind::default(), SceneKind::Lighting);
    }

    #[test]
    fn camera_scenes() {
        let with_camera: Vec<_> = SceneKind::ALL
            .into_iter()
            .filter(|kind| kind.uses_camera())
            .collect();
        assert_eq!(
            with_camera,
            [
                SceneKind::CameraCubes,
                SceneKind::Lighting,
                SceneKind::LightingMaps
            ]
        );
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&SceneKind::LightingMaps).unwrap();
        assert_eq!(json, "\"lighting_maps\"");
    }
}
