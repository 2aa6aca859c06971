//! The quad drawn every frame.
//!
//! Positions are clip-space and never change; texture coordinates put
//! `(0, 0)` at the top-left corner and `(1, 1)` at the bottom-right.

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex: 3 position floats followed by 2 texcoord floats.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    pub const STRIDE: u64 = std::mem::size_of::<Vertex>() as u64;
    pub const POSITION_OFFSET: u64 = 0;
    pub const TEX_COORD_OFFSET: u64 = std::mem::size_of::<[f32; 3]>() as u64;

    /// Attribute table for the given shader locations.
    pub fn attributes(position_slot: u32, tex_coord_slot: u32) -> [wgpu::VertexAttribute; 2] {
        [
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: Self::POSITION_OFFSET,
                shader_location: position_slot,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: Self::TEX_COORD_OFFSET,
                shader_location: tex_coord_slot,
            },
        ]
    }

    pub fn layout(attributes: &[wgpu::VertexAttribute; 2]) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex { position: [-0.5,  0.5, 0.0], tex_coord: [0.0, 0.0] },
    Vertex { position: [-0.5, -0.5, 0.0], tex_coord: [0.0, 1.0] },
    Vertex { position: [ 0.5, -0.5, 0.0], tex_coord: [1.0, 1.0] },
    Vertex { position: [ 0.5,  0.5, 0.0], tex_coord: [1.0, 0.0] },
];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

pub const TRIANGLE_COUNT: usize = QUAD_INDICES.len() / 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_vertices_six_indices_two_triangles() {
        assert_eq!(QUAD_VERTICES.len(), 4);
        assert_eq!(QUAD_INDICES.len(), 6);
        assert_eq!(TRIANGLE_COUNT, 2);
    }

    #[test]
    fn interleaved_layout_is_five_floats() {
        assert_eq!(Vertex::STRIDE, 5 * 4);
        assert_eq!(Vertex::POSITION_OFFSET, 0);
        assert_eq!(Vertex::TEX_COORD_OFFSET, 3 * 4);
        assert_eq!(bytemuck::cast_slice::<Vertex, f32>(&QUAD_VERTICES).len(), 20);
    }

    #[test]
    fn corner_positions() {
        let positions: Vec<[f32; 3]> = QUAD_VERTICES.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![
                [-0.5, 0.5, 0.0],
                [-0.5, -0.5, 0.0],
                [0.5, -0.5, 0.0],
                [0.5, 0.5, 0.0],
            ]
        );
    }

    #[test]
    fn texture_coordinates_flip_vertically() {
        let uvs: Vec<[f32; 2]> = QUAD_VERTICES.iter().map(|v| v.tex_coord).collect();
        assert_eq!(uvs, vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]);

        // Top-left corner samples texture row 0, which holds the bitmap's
        // bottom row, so the picture shows upside down.
        let top_left = QUAD_VERTICES
            .iter()
            .find(|v| v.position[0] < 0.0 && v.position[1] > 0.0)
            .unwrap();
        assert_eq!(top_left.tex_coord, [0.0, 0.0]);
    }

    #[test]
    fn indices_reference_every_vertex() {
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
        for v in 0..QUAD_VERTICES.len() as u16 {
            assert!(QUAD_INDICES.contains(&v));
        }
    }

    #[test]
    fn triangles_share_the_diagonal() {
        let (a, b) = QUAD_INDICES.split_at(3);
        assert_eq!(a, [0, 1, 2]);
        assert_eq!(b, [0, 2, 3]);
    }

    #[test]
    fn attributes_follow_resolved_slots() {
        let attrs = Vertex::attributes(3, 7);
        assert_eq!(attrs[0].shader_location, 3);
        assert_eq!(attrs[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attrs[1].shader_location, 7);
        assert_eq!(attrs[1].offset, 12);

        let layout = Vertex::layout(&attrs);
        assert_eq!(layout.array_stride, 20);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
    }
}
