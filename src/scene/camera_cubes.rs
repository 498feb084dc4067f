use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use super::geometry::{cube_vertices, MeshVertex};
use super::{begin_pass, Frame, Scene, SceneInit};
use crate::camera::Camera;
use crate::error::GlearnError;
use crate::gpu::mesh::{Mesh, Vertex};
use crate::gpu::pipeline_helpers::{
    create_render_pipeline, textures_with_sampler_bind_group,
    textures_with_sampler_layout, PipelineDesc,
};
use crate::gpu::shaders;
use crate::gpu::texture::{DepthTexture, Texture};
use crate::gpu::uniform::UniformBuffer;

/// Cube centers, scattered in front of the default camera.
const CUBE_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

/// Radians per second.
const ROTATION_SPEED: f32 = 0.25;
/// Tilt of the first cube before any rotation.
const BASE_TILT_DEGREES: f32 = 55.0;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct ModelUniform {
    model: [[f32; 4]; 4],
}

/// Model matrix of cube `index` after `angle` radians of spin.
///
/// Every cube spins about its own tilted axis, offset by 20 degrees per
/// index so no two share an orientation.
#[must_use]
pub fn cube_model(index: usize, angle: f32) -> Mat4 {
    let position = CUBE_POSITIONS[index % CUBE_POSITIONS.len()];
    let axis = Vec3::new(1.0, 0.3, 0.5).normalize();
    let base = (BASE_TILT_DEGREES + 20.0 * index as f32).to_radians();
    Mat4::from_translation(position) * Mat4::from_axis_angle(axis, base + angle)
}

/// Textured cubes seen through the fly camera.
pub struct CameraCubesScene {
    pipeline: wgpu::RenderPipeline,
    cube: Mesh,
    models: Vec<UniformBuffer<ModelUniform>>,
    texture_bind_group: wgpu::BindGroup,
    depth: DepthTexture,
    angle: f32,
}

impl CameraCubesScene {
    /// Build the pipeline, load the texture, and create one model uniform
    /// per cube.
    ///
    /// # Errors
    ///
    /// Returns [`GlearnError::Shader`] if the shader fails to compose.
    pub fn new(init: &mut SceneInit<'_>) -> Result<Self, GlearnError> {
        let context = init.context;
        let device = &context.device;
        let camera_layout = init.camera_layout;
        let options = init.options;
        let shader = init.shaders.load(device, &shaders::CUBES)?;

        let models: Vec<_> = (0..CUBE_POSITIONS.len())
            .map(|index| {
                UniformBuffer::new(
                    device,
                    &format!("Cube {index} Model"),
                    &ModelUniform {
                        model: cube_model(index, 0.0).to_cols_array_2d(),
                    },
                    wgpu::ShaderStages::VERTEX,
                )
            })
            .collect();

        let texture = Texture::load_or_fallback(
            device,
            &context.queue,
            &options.assets.texture,
        );
        let texture_layout =
            textures_with_sampler_layout(device, "Cube Texture", 1);
        let texture_bind_group = textures_with_sampler_bind_group(
            device,
            "Cube Texture",
            &texture_layout,
            &[&texture.view],
            &texture.sampler,
        );

        let pipeline = create_render_pipeline(
            device,
            &PipelineDesc {
                vertex_layouts: &[MeshVertex::layout()],
                bind_group_layouts: &[
                    camera_layout,
                    models[0].layout(),
                    &texture_layout,
                ],
                depth: true,
                ..PipelineDesc::new("Camera Cubes", &shader, context.format())
            },
        );

        Ok(Self {
            pipeline,
            cube: Mesh::new(device, "Cube", &cube_vertices(), None),
            models,
            texture_bind_group,
            depth: DepthTexture::new(device, context.width(), context.height()),
            angle: 0.0,
        })
    }
}

impl Scene for CameraCubesScene {
    fn update(&mut self, queue: &wgpu::Queue, _camera: &Camera, dt: f32) {
        self.angle =
            (self.angle + ROTATION_SPEED * dt.max(0.0)) % std::f32::consts::TAU;
        for (index, model) in self.models.iter().enumerate() {
            model.write(
                queue,
                &ModelUniform {
                    model: cube_model(index, self.angle).to_cols_array_2d(),
                },
            );
        }
    }

    fn render(&self, frame: &mut Frame<'_>) {
        let mut pass = begin_pass(
            frame.encoder,
            "Camera Cubes Pass",
            frame.target,
            wgpu::LoadOp::Clear(frame.clear_color),
            Some(&self.depth),
        );
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, frame.camera, &[]);
        pass.set_bind_group(2, &self.texture_bind_group, &[]);
        for model in &self.models {
            pass.set_bind_group(1, model.bind_group(), &[]);
            self.cube.draw(&mut pass);
        }
    }

    fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth = DepthTexture::new(device, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_cube_sits_at_origin() {
        let origin = cube_model(0, 1.0).transform_point3(Vec3::ZERO);
        assert!(origin.length() < 1e-6);
    }

    #[test]
    fn spin_preserves_center_and_scale() {
        for index in 0..CUBE_POSITIONS.len() {
            let model = cube_model(index, 2.5);
            let center = model.transform_point3(Vec3::ZERO);
            assert!((center - CUBE_POSITIONS[index]).length() < 1e-5);
            let edge = model.transform_vector3(Vec3::X);
            assert!((edge.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn cubes_have_distinct_orientations() {
        let a = cube_model(1, 0.0).transform_vector3(Vec3::X);
        let b = cube_model(2, 0.0).transform_vector3(Vec3::X);
        assert!((a - b).length() > 1e-3);
    }
}
