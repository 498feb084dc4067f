use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::gpu::render_context::RenderContext;
use crate::options::CameraOptions;

/// Owns the fly camera, its projection parameters, and the GPU resources
/// that carry its matrices to shaders (bind group 0 in every scene).
pub struct CameraController {
    camera: Camera,
    aspect: f32,
    znear: f32,
    zfar: f32,
    clamp_pitch: bool,

    /// CPU-side copy of the uniform last written to `buffer`.
    pub uniform: CameraUniform,
    /// Uniform buffer backing [`CameraUniform`].
    pub buffer: wgpu::Buffer,
    /// Bind group layout shared by all scene pipelines.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group binding `buffer` at slot 0.
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Create the camera described by `options` and its GPU resources.
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let camera = Camera::from_options(options);
        let aspect = aspect_ratio(context.config.width, context.config.height);

        let mut uniform = CameraUniform::new();
        uniform.update(
            &camera,
            camera.projection_matrix(aspect, options.znear, options.zfar),
        );

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Camera Bind Group"),
                });

        Self {
            camera,
            aspect,
            znear: options.znear,
            zfar: options.zfar,
            clamp_pitch: options.clamp_pitch,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// The camera being driven.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access for movement updates.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Apply a look offset, honoring the configured pitch clamp.
    pub fn look(&mut self, x_offset: f32, y_offset: f32) {
        self.camera.apply_look(x_offset, y_offset, self.clamp_pitch);
    }

    /// Forward a scroll amount to the camera's zoom.
    pub fn zoom(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    /// Current projection matrix.
    pub fn projection(&self) -> Mat4 {
        self.camera
            .projection_matrix(self.aspect, self.znear, self.zfar)
    }

    /// Recompute the uniform and upload it.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update(&self.camera, self.projection());
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Track the new viewport aspect ratio. Zero-sized dimensions are
    /// ignored (minimized windows).
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = aspect_ratio(width, height);
        }
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
