//! Vertex formats and the fixed geometry the scenes draw.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::gpu::mesh::Vertex;

/// Position-only vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PositionVertex {
    /// Position.
    pub position: [f32; 3],
}

impl Vertex for PositionVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] =
        &wgpu::vertex_attr_array![0 => Float32x3];
}

/// Position and texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    /// Position.
    pub position: [f32; 3],
    /// Texture coordinate, `v = 0` at the bottom.
    pub uv: [f32; 2],
}

impl Vertex for TexturedVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] =
        &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];
}

/// Position, normal, and texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position.
    pub position: [f32; 3],
    /// Outward unit normal.
    pub normal: [f32; 3],
    /// Texture coordinate, `v = 0` at the bottom.
    pub uv: [f32; 2],
}

impl Vertex for MeshVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2
    ];
}

/// Clip-space 2D position.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ScreenVertex {
    /// Position in normalized device coordinates.
    pub position: [f32; 2],
}

impl Vertex for ScreenVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] =
        &wgpu::vertex_attr_array![0 => Float32x2];
}

/// Clip-space 2D position with a texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ScreenUvVertex {
    /// Position in normalized device coordinates.
    pub position: [f32; 2],
    /// Texture coordinate, `v = 0` at the top.
    pub uv: [f32; 2],
}

impl Vertex for ScreenUvVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] =
        &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];
}

/// Large triangle in the middle of the screen.
pub const TRIANGLE: [PositionVertex; 3] = [
    PositionVertex { position: [-0.5, -0.5, 0.0] },
    PositionVertex { position: [0.5, -0.5, 0.0] },
    PositionVertex { position: [0.0, 0.5, 0.0] },
];

/// Small centered square, drawn through [`RECT_INDICES`].
pub const RECT: [PositionVertex; 4] = [
    PositionVertex { position: [-0.2, -0.2, 0.0] },
    PositionVertex { position: [0.2, -0.2, 0.0] },
    PositionVertex { position: [-0.2, 0.2, 0.0] },
    PositionVertex { position: [0.2, 0.2, 0.0] },
];

/// Two triangles sharing the [`RECT`] diagonal.
pub const RECT_INDICES: [u16; 6] = [0, 1, 2, 1, 2, 3];

/// Textured square, counter-clockwise from the bottom-left corner.
pub const TEXTURED_QUAD: [TexturedVertex; 4] = [
    TexturedVertex { position: [-0.5, -0.5, 0.0], uv: [0.0, 0.0] },
    TexturedVertex { position: [0.5, -0.5, 0.0], uv: [1.0, 0.0] },
    TexturedVertex { position: [0.5, 0.5, 0.0], uv: [1.0, 1.0] },
    TexturedVertex { position: [-0.5, 0.5, 0.0], uv: [0.0, 1.0] },
];

/// Indices for [`TEXTURED_QUAD`].
pub const TEXTURED_QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// Full-screen triangle strip.
pub const FULLSCREEN_STRIP: [ScreenVertex; 4] = [
    ScreenVertex { position: [-1.0, -1.0] },
    ScreenVertex { position: [-1.0, 1.0] },
    ScreenVertex { position: [1.0, -1.0] },
    ScreenVertex { position: [1.0, 1.0] },
];

/// Full-screen triangle strip mapping the whole of a render target.
pub const FULLSCREEN_UV_STRIP: [ScreenUvVertex; 4] = [
    ScreenUvVertex { position: [-1.0, -1.0], uv: [0.0, 1.0] },
    ScreenUvVertex { position: [-1.0, 1.0], uv: [0.0, 0.0] },
    ScreenUvVertex { position: [1.0, -1.0], uv: [1.0, 1.0] },
    ScreenUvVertex { position: [1.0, 1.0], uv: [1.0, 0.0] },
];

/// Unit cube centered at the origin: 6 faces x 2 triangles, wound
/// counter-clockwise seen from outside, each face mapping the full texture.
pub fn cube_vertices() -> Vec<MeshVertex> {
    // (normal, u axis, v axis) with u x v = normal.
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];
    const CORNERS: [(f32, f32); 6] = [
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (1.0, 1.0),
        (0.0, 1.0),
        (0.0, 0.0),
    ];

    FACES
        .iter()
        .flat_map(|&(normal, u_axis, v_axis)| {
            CORNERS.iter().map(move |&(u, v)| {
                let position = normal * 0.5
                    + u_axis * (u - 0.5)
                    + v_axis * (v - 0.5);
                MeshVertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    uv: [u, v],
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_36_vertices_on_its_surface() {
        let vertices = cube_vertices();
        assert_eq!(vertices.len(), 36);
        for v in &vertices {
            let p = Vec3::from(v.position);
            let n = Vec3::from(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-6);
            assert!((p.dot(n) - 0.5).abs() < 1e-6, "{p} not on face {n}");
            assert!(p.abs().max_element() <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn cube_triangles_face_outward() {
        let vertices = cube_vertices();
        for tri in vertices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|v| Vec3::from(v.position));
            let face_normal = (b - a).cross(c - a);
            assert!(face_normal.dot(Vec3::from(tri[0].normal)) > 0.0);
        }
    }

    #[test]
    fn quad_indices_stay_in_range() {
        assert!(RECT_INDICES.iter().all(|&i| usize::from(i) < RECT.len()));
        assert!(
            TEXTURED_QUAD_INDICES
                .iter()
                .all(|&i| usize::from(i) < TEXTURED_QUAD.len())
        );
    }
}
