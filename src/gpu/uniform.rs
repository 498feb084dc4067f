//! Single-value uniform buffers with their own bind group.

use std::marker::PhantomData;

use wgpu::util::DeviceExt;

use super::pipeline_helpers::uniform_buffer;

/// A uniform buffer holding one `T`, bound alone at binding 0 of its own
/// bind group.
///
/// Buffers of the same `T` and visibility have identical layouts, so a
/// pipeline built from one buffer's layout accepts all of their bind groups.
pub struct UniformBuffer<T> {
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> UniformBuffer<T> {
    /// Upload `value` and build the layout and bind group.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        value: &T,
        visibility: wgpu::ShaderStages,
    ) -> Self {
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Buffer")),
                contents: bytemuck::bytes_of(value),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{label} Layout")),
                entries: &[uniform_buffer(0, visibility)],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            layout,
            bind_group,
            _marker: PhantomData,
        }
    }

    /// Layout with a single uniform entry at binding 0.
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind group referencing the buffer.
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Overwrite the buffer contents.
    pub fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }
}
