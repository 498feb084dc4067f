use bytemuck::{Pod, Zeroable};

use super::geometry::{PositionVertex, RECT, RECT_INDICES, TRIANGLE};
use super::{begin_pass, Frame, Scene, SceneInit};
use crate::camera::Camera;
use crate::error::GlearnError;
use crate::gpu::mesh::{Mesh, Vertex};
use crate::gpu::pipeline_helpers::{
    create_render_pipeline, PipelineDesc, PREMULTIPLIED_BLEND,
};
use crate::gpu::shaders;
use crate::gpu::uniform::UniformBuffer;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct ColorUniform {
    color: [f32; 4],
}

/// Rectangle color at `time` seconds. Each channel is clamped to `[0, 1]`.
#[must_use]
pub fn rect_color(time: f32) -> [f32; 4] {
    let (sin, cos) = time.sin_cos();
    [
        (2.0 * sin + 0.5).clamp(0.0, 1.0),
        (6.0 * sin + 0.5).clamp(0.0, 1.0),
        (2.0 * cos + 0.5).clamp(0.0, 1.0),
        1.0,
    ]
}

/// Indexed rectangle with a cycling color under a translucent triangle.
pub struct TrianglesScene {
    rect_pipeline: wgpu::RenderPipeline,
    triangle_pipeline: wgpu::RenderPipeline,
    rect: Mesh,
    triangle: Mesh,
    tint: UniformBuffer<ColorUniform>,
    time: f32,
}

impl TrianglesScene {
    /// Build pipelines and upload geometry.
    ///
    /// # Errors
    ///
    /// Returns [`GlearnError::Shader`] if the shader fails to compose.
    pub fn new(init: &mut SceneInit<'_>) -> Result<Self, GlearnError> {
        let context = init.context;
        let device = &context.device;
        let shader = init.shaders.load(device, &shaders::TRIANGLE)?;

        let tint = UniformBuffer::new(
            device,
            "Rectangle Color",
            &ColorUniform {
                color: rect_color(0.0),
            },
            wgpu::ShaderStages::FRAGMENT,
        );

        let format = context.format();
        let build = |label: &'static str, fs_entry: &'static str| {
            create_render_pipeline(
                device,
                &PipelineDesc {
                    fs_entry,
                    vertex_layouts: &[PositionVertex::layout()],
                    bind_group_layouts: &[tint.layout()],
                    blend: Some(PREMULTIPLIED_BLEND),
                    ..PipelineDesc::new(label, &shader, format)
                },
            )
        };

        Ok(Self {
            rect_pipeline: build("Rectangle", "fs_uniform"),
            triangle_pipeline: build("Triangle", "fs_flat"),
            rect: Mesh::new(device, "Rectangle", &RECT, Some(&RECT_INDICES)),
            triangle: Mesh::new(device, "Triangle", &TRIANGLE, None),
            tint,
            time: 0.0,
        })
    }
}

impl Scene for TrianglesScene {
    fn update(&mut self, queue: &wgpu::Queue, _camera: &Camera, dt: f32) {
        self.time += dt.max(0.0);
        self.tint.write(
            queue,
            &ColorUniform {
                color: rect_color(self.time),
            },
        );
    }

    fn render(&self, frame: &mut Frame<'_>) {
        let mut pass = begin_pass(
            frame.encoder,
            "Triangles Pass",
            frame.target,
            wgpu::LoadOp::Clear(frame.clear_color),
            None,
        );
        pass.set_bind_group(0, self.tint.bind_group(), &[]);

        pass.set_pipeline(&self.rect_pipeline);
        self.rect.draw(&mut pass);

        pass.set_pipeline(&self.triangle_pipeline);
        self.triangle.draw(&mut pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_channels_stay_in_unit_range() {
        for step in 0..1000 {
            let color = rect_color(step as f32 * 0.037);
            assert!(color.iter().all(|c| (0.0..=1.0).contains(c)), "{color:?}");
        }
    }

    #[test]
    fn color_at_zero() {
        assert_eq!(rect_color(0.0), [0.5, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn green_saturates_first() {
        // sin(0.2) ~ 0.199: 6 * 0.199 + 0.5 > 1, 2 * 0.199 + 0.5 < 1.
        let color = rect_color(0.2);
        assert_eq!(color[1], 1.0);
        assert!(color[0] < 1.0);
    }
}
