use super::geometry::{TexturedVertex, TEXTURED_QUAD, TEXTURED_QUAD_INDICES};
use super::{begin_pass, Frame, Scene, SceneInit};
use crate::camera::Camera;
use crate::error::GlearnError;
use crate::gpu::mesh::{Mesh, Vertex};
use crate::gpu::pipeline_helpers::{
    create_render_pipeline, textures_with_sampler_bind_group,
    textures_with_sampler_layout, PipelineDesc,
};
use crate::gpu::shaders;
use crate::gpu::texture::Texture;

/// A textured rectangle in screen space.
pub struct TexturedQuadScene {
    pipeline: wgpu::RenderPipeline,
    quad: Mesh,
    texture_bind_group: wgpu::BindGroup,
}

impl TexturedQuadScene {
    /// Load the texture (or its fallback) and build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`GlearnError::Shader`] if the shader fails to compose.
    pub fn new(init: &mut SceneInit<'_>) -> Result<Self, GlearnError> {
        let context = init.context;
        let device = &context.device;
        let options = init.options;
        let shader = init.shaders.load(device, &shaders::TEXTURED_QUAD)?;

        let texture = Texture::load_or_fallback(
            device,
            &context.queue,
            &options.assets.texture,
        );
        let layout = textures_with_sampler_layout(device, "Quad Texture", 1);
        let texture_bind_group = textures_with_sampler_bind_group(
            device,
            "Quad Texture",
            &layout,
            &[&texture.view],
            &texture.sampler,
        );

        let pipeline = create_render_pipeline(
            device,
            &PipelineDesc {
                vertex_layouts: &[TexturedVertex::layout()],
                bind_group_layouts: &[&layout],
                ..PipelineDesc::new("Textured Quad", &shader, context.format())
            },
        );

        Ok(Self {
            pipeline,
            quad: Mesh::new(
                device,
                "Textured Quad",
                &TEXTURED_QUAD,
                Some(&TEXTURED_QUAD_INDICES),
            ),
            texture_bind_group,
        })
    }
}

impl Scene for TexturedQuadScene {
    fn update(&mut self, _queue: &wgpu::Queue, _camera: &Camera, _dt: f32) {}

    fn render(&self, frame: &mut Frame<'_>) {
        let mut pass = begin_pass(
            frame.encoder,
            "Textured Quad Pass",
            frame.target,
            wgpu::LoadOp::Clear(frame.clear_color),
            None,
        );
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.texture_bind_group, &[]);
        self.quad.draw(&mut pass);
    }
}
