//! Static vertex/index buffers and the vertex layout trait.

use wgpu::util::DeviceExt;

/// A plain-old-data vertex with a fixed attribute layout.
pub trait Vertex: bytemuck::Pod {
    /// Attributes in shader location order.
    const ATTRIBUTES: &'static [wgpu::VertexAttribute];

    /// Per-vertex buffer layout built from [`Self::ATTRIBUTES`].
    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: Self::ATTRIBUTES,
        }
    }
}

/// Immutable geometry uploaded once at scene creation.
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    index_buffer: Option<(wgpu::Buffer, u32)>,
}

impl Mesh {
    /// Upload `vertices` and, when given, a `u16` index buffer.
    pub fn new<V: Vertex>(
        device: &wgpu::Device,
        label: &str,
        vertices: &[V],
        indices: Option<&[u16]>,
    ) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertices")),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = indices.map(|indices| {
            let buffer =
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{label} Indices")),
                    contents: bytemuck::cast_slice(indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            (buffer, indices.len() as u32)
        });

        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            index_buffer,
        }
    }

    /// Number of vertices (or indices, when indexed) drawn.
    pub fn element_count(&self) -> u32 {
        self.index_buffer
            .as_ref()
            .map_or(self.vertex_count, |(_, count)| *count)
    }

    /// Bind the buffers to slot 0 and issue one draw. Empty meshes draw
    /// nothing.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.element_count() == 0 {
            return;
        }
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some((indices, count)) => {
                pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..*count, 0, 0..1);
            }
            None => pass.draw(0..self.vertex_count, 0..1),
        }
    }
}
