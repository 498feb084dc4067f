use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use super::geometry::{cube_vertices, MeshVertex};
use super::{begin_pass, Frame, Scene, SceneInit};
use crate::camera::Camera;
use crate::error::GlearnError;
use crate::gpu::mesh::{Mesh, Vertex};
use crate::gpu::pipeline_helpers::{create_render_pipeline, PipelineDesc};
use crate::gpu::shaders;
use crate::gpu::texture::DepthTexture;
use crate::gpu::uniform::UniformBuffer;
use crate::input::KeyAction;
use crate::options::{LightingOptions, ShadingModel};

/// Static tilt of the lit cube.
const OBJECT_TILT_DEGREES: f32 = 55.0;
/// Edge length of the lamp cube.
const LAMP_SCALE: f32 = 0.2;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct ObjectUniform {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    object_color: [f32; 3],
    ambient_strength: f32,
    light_position: [f32; 3],
    specular_strength: f32,
    light_color: [f32; 3],
    shininess: f32,
}

impl ObjectUniform {
    fn new(model: Mat4, lighting: &LightingOptions) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix(model).to_cols_array_2d(),
            object_color: lighting.object_color,
            ambient_strength: lighting.ambient_strength,
            light_position: lighting.light_position,
            specular_strength: lighting.specular_strength,
            light_color: lighting.light_color,
            shininess: lighting.shininess,
        }
    }
}

/// Inverse-transpose of `model`, for transforming normals. Falls back to
/// `model` itself when it is singular.
#[must_use]
pub fn normal_matrix(model: Mat4) -> Mat4 {
    if model.determinant().abs() < f32::EPSILON {
        return model;
    }
    model.inverse().transpose()
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct LampUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

/// Small unlit cube marking the light position.
pub(crate) struct Lamp {
    pipeline: wgpu::RenderPipeline,
    uniform: UniformBuffer<LampUniform>,
}

impl Lamp {
    pub(crate) fn new(
        init: &mut SceneInit<'_>,
        lighting: &LightingOptions,
    ) -> Result<Self, GlearnError> {
        let context = init.context;
        let device = &context.device;
        let camera_layout = init.camera_layout;
        let shader = init.shaders.load(device, &shaders::LAMP)?;

        let [r, g, b] = lighting.light_color;
        let uniform = UniformBuffer::new(
            device,
            "Lamp",
            &LampUniform {
                model: lamp_model(Vec3::from(lighting.light_position))
                    .to_cols_array_2d(),
                color: [r, g, b, 1.0],
            },
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );

        let pipeline = create_render_pipeline(
            device,
            &PipelineDesc {
                vertex_layouts: &[MeshVertex::layout()],
                bind_group_layouts: &[camera_layout, uniform.layout()],
                depth: true,
                ..PipelineDesc::new("Lamp", &shader, context.format())
            },
        );

        Ok(Self { pipeline, uniform })
    }

    /// Draw `cube` as the lamp. Expects the camera at group 0.
    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>, cube: &Mesh) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, self.uniform.bind_group(), &[]);
        cube.draw(pass);
    }
}

/// Model matrix of the lamp cube at `light_position`.
#[must_use]
pub fn lamp_model(light_position: Vec3) -> Mat4 {
    Mat4::from_translation(light_position) * Mat4::from_scale(Vec3::splat(LAMP_SCALE))
}

/// A flat-colored cube lit by a point light, with a lamp cube at the light.
///
/// `ToggleShading` switches between per-fragment (Phong) and per-vertex
/// (Gouraud) evaluation of the same lighting equation.
pub struct LightingScene {
    phong: wgpu::RenderPipeline,
    gouraud: wgpu::RenderPipeline,
    cube: Mesh,
    object: UniformBuffer<ObjectUniform>,
    lamp: Lamp,
    depth: DepthTexture,
    shading: ShadingModel,
}

impl LightingScene {
    /// Build both shading pipelines, the lamp, and the object uniform.
    ///
    /// # Errors
    ///
    /// Returns [`GlearnError::Shader`] if a shader fails to compose.
    pub fn new(init: &mut SceneInit<'_>) -> Result<Self, GlearnError> {
        let context = init.context;
        let device = &context.device;
        let camera_layout = init.camera_layout;
        let options = init.options;
        let lighting = &options.lighting;
        let shader = init.shaders.load(device, &shaders::LIGHTING)?;

        let model = Mat4::from_rotation_x(OBJECT_TILT_DEGREES.to_radians());
        let object = UniformBuffer::new(
            device,
            "Lit Object",
            &ObjectUniform::new(model, lighting),
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );

        let build = |label: &'static str,
                     vs_entry: &'static str,
                     fs_entry: &'static str| {
            create_render_pipeline(
                device,
                &PipelineDesc {
                    vs_entry,
                    fs_entry,
                    vertex_layouts: &[MeshVertex::layout()],
                    bind_group_layouts: &[camera_layout, object.layout()],
                    depth: true,
                    ..PipelineDesc::new(label, &shader, context.format())
                },
            )
        };
        let phong = build("Phong", "vs_phong", "fs_phong");
        let gouraud = build("Gouraud", "vs_gouraud", "fs_gouraud");

        let lamp = Lamp::new(init, lighting)?;

        Ok(Self {
            phong,
            gouraud,
            cube: Mesh::new(device, "Cube", &cube_vertices(), None),
            object,
            lamp,
            depth: DepthTexture::new(device, context.width(), context.height()),
            shading: lighting.shading,
        })
    }
}

impl Scene for LightingScene {
    fn update(&mut self, _queue: &wgpu::Queue, _camera: &Camera, _dt: f32) {}

    fn render(&self, frame: &mut Frame<'_>) {
        let mut pass = begin_pass(
            frame.encoder,
            "Lighting Pass",
            frame.target,
            wgpu::LoadOp::Clear(frame.clear_color),
            Some(&self.depth),
        );
        pass.set_bind_group(0, frame.camera, &[]);

        pass.set_pipeline(match self.shading {
            ShadingModel::Phong => &self.phong,
            ShadingModel::Gouraud => &self.gouraud,
        });
        pass.set_bind_group(1, self.object.bind_group(), &[]);
        self.cube.draw(&mut pass);

        self.lamp.draw(&mut pass, &self.cube);
    }

    fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth = DepthTexture::new(device, width, height);
    }

    fn handle_action(&mut self, action: KeyAction) {
        if action == KeyAction::ToggleShading {
            self.shading = self.shading.toggled();
            log::info!("shading: {:?}", self.shading);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_matrix_of_rotation_is_rotation() {
        let model = Mat4::from_rotation_x(OBJECT_TILT_DEGREES.to_radians());
        let n = normal_matrix(model);
        assert!(n.abs_diff_eq(model, 1e-5));
    }

    #[test]
    fn normal_matrix_keeps_normals_perpendicular_under_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let n = normal_matrix(model);
        // Surface tangent (1, -1, 0) with normal (1, 1, 0).
        let tangent = model.transform_vector3(Vec3::new(1.0, -1.0, 0.0));
        let normal = n.transform_vector3(Vec3::new(1.0, 1.0, 0.0));
        assert!(tangent.dot(normal).abs() < 1e-5);
    }

    #[test]
    fn singular_model_falls_back() {
        let model = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(normal_matrix(model), model);
    }

    #[test]
    fn lamp_sits_at_light() {
        let light = Vec3::new(1.2, 1.0, 2.0);
        let model = lamp_model(light);
        assert!(model.transform_point3(Vec3::ZERO).abs_diff_eq(light, 1e-6));
        let corner = model.transform_point3(Vec3::splat(0.5));
        assert!(corner.abs_diff_eq(light + Vec3::splat(0.1), 1e-6));
    }
}
