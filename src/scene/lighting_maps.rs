use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use super::geometry::{cube_vertices, MeshVertex};
use super::lighting::{normal_matrix, Lamp};
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
use crate::options::LightingOptions;

/// Radians per second about [`spin_axis`].
const ROTATION_SPEED: f32 = 0.3;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct MaterialUniform {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    light_position: [f32; 3],
    shininess: f32,
    light_ambient: [f32; 3],
    emission: f32,
    light_diffuse: [f32; 3],
    _pad0: f32,
    light_specular: [f32; 3],
    _pad1: f32,
}

impl MaterialUniform {
    fn new(model: Mat4, lighting: &LightingOptions) -> Self {
        let light = Vec3::from(lighting.light_color);
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix(model).to_cols_array_2d(),
            light_position: lighting.light_position,
            shininess: lighting.shininess,
            light_ambient: (light * lighting.ambient).to_array(),
            emission: lighting.emission,
            light_diffuse: (light * lighting.diffuse).to_array(),
            _pad0: 0.0,
            light_specular: (light * lighting.specular).to_array(),
            _pad1: 0.0,
        }
    }
}

fn spin_axis() -> Vec3 {
    Vec3::new(-1.0, 1.0, 1.0).normalize()
}

/// A rotating cube shaded with diffuse, specular, and emission maps, plus
/// the lamp cube.
pub struct LightingMapsScene {
    pipeline: wgpu::RenderPipeline,
    cube: Mesh,
    material: UniformBuffer<MaterialUniform>,
    maps_bind_group: wgpu::BindGroup,
    lamp: Lamp,
    depth: DepthTexture,
    lighting: LightingOptions,
    angle: f32,
}

impl LightingMapsScene {
    /// Load the three maps (falling back to checkerboards) and build the
    /// pipelines.
    ///
    /// # Errors
    ///
    /// Returns [`GlearnError::Shader`] if a shader fails to compose.
    pub fn new(init: &mut SceneInit<'_>) -> Result<Self, GlearnError> {
        let context = init.context;
        let device = &context.device;
        let camera_layout = init.camera_layout;
        let options = init.options;
        let shader = init.shaders.load(device, &shaders::LIGHTING_MAPS)?;

        let material = UniformBuffer::new(
            device,
            "Material",
            &MaterialUniform::new(Mat4::IDENTITY, &options.lighting),
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );

        let assets = &options.assets;
        let [diffuse, specular, emission] = [
            &assets.diffuse_map,
            &assets.specular_map,
            &assets.emission_map,
        ]
        .map(|path| Texture::load_or_fallback(device, &context.queue, path));
        let maps_layout = textures_with_sampler_layout(device, "Material Maps", 3);
        let maps_bind_group = textures_with_sampler_bind_group(
            device,
            "Material Maps",
            &maps_layout,
            &[&diffuse.view, &specular.view, &emission.view],
            &diffuse.sampler,
        );

        let pipeline = create_render_pipeline(
            device,
            &PipelineDesc {
                vertex_layouts: &[MeshVertex::layout()],
                bind_group_layouts: &[
                    camera_layout,
                    material.layout(),
                    &maps_layout,
                ],
                depth: true,
                ..PipelineDesc::new("Lighting Maps", &shader, context.format())
            },
        );

        let lamp = Lamp::new(init, &options.lighting)?;

        Ok(Self {
            pipeline,
            cube: Mesh::new(device, "Cube", &cube_vertices(), None),
            material,
            maps_bind_group,
            lamp,
            depth: DepthTexture::new(device, context.width(), context.height()),
            lighting: options.lighting.clone(),
            angle: 0.0,
        })
    }
}

impl Scene for LightingMapsScene {
    fn update(&mut self, queue: &wgpu::Queue, _camera: &Camera, dt: f32) {
        self.angle =
            (self.angle + ROTATION_SPEED * dt.max(0.0)) % std::f32::consts::TAU;
        let model = Mat4::from_axis_angle(spin_axis(), self.angle);
        self.material
            .write(queue, &MaterialUniform::new(model, &self.lighting));
    }

    fn render(&self, frame: &mut Frame<'_>) {
        let mut pass = begin_pass(
            frame.encoder,
            "Lighting Maps Pass",
            frame.target,
            wgpu::LoadOp::Clear(frame.clear_color),
            Some(&self.depth),
        );
        pass.set_bind_group(0, frame.camera, &[]);

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, self.material.bind_group(), &[]);
        pass.set_bind_group(2, &self.maps_bind_group, &[]);
        self.cube.draw(&mut pass);

        self.lamp.draw(&mut pass, &self.cube);
    }

    fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth = DepthTexture::new(device, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_terms_scale_light_color() {
        let lighting = LightingOptions {
            light_color: [1.0, 0.5, 0.0],
            ..LightingOptions::default()
        };
        let uniform = MaterialUniform::new(Mat4::IDENTITY, &lighting);
        assert_eq!(uniform.light_ambient, [0.2, 0.1, 0.0]);
        assert_eq!(uniform.light_diffuse, [0.5, 0.25, 0.0]);
        assert_eq!(uniform.light_specular, [1.0, 0.5, 0.0]);
        assert_eq!(uniform.shininess, 64.0);
    }

    #[test]
    fn uniform_matches_wgsl_layout() {
        // Two mat4x4 plus four vec3/f32 pairs.
        assert_eq!(size_of::<MaterialUniform>(), 2 * 64 + 4 * 16);
    }

    #[test]
    fn spin_axis_is_unit() {
        assert!((spin_axis().length() - 1.0).abs() < 1e-6);
    }
}
