use bytemuck::{Pod, Zeroable};
use std::mem;

const R: [f32; 3] = [1.0, 0.0, 0.0];
const G: [f32; 3] = [0.0, 1.0, 0.0];
const B: [f32; 3] = [0.0, 0.0, 1.0];

pub const VERTEX_COUNT: usize = 3;

/// Bytes between the start of two consecutive vertices.
pub const STRIDE: usize = mem::size_of::<Vertex>();

/// Byte offset of `color` inside a vertex.
pub const COLOR_OFFSET: usize = mem::size_of::<[f32; 3]>();

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

pub const TRIANGLE: [Vertex; VERTEX_COUNT] = [
    Vertex {
        position: [-1.0, -1.0, 1.0],
        color: R,
    },
    Vertex {
        position: [1.0, -1.0, 1.0],
        color: G,
    },
    Vertex {
        position: [0.0, 1.0, 1.0],
        color: B,
    },
];

/// Colors for time `t`: vertex `i` carries `sin(t)` in channel `i`, zero elsewhere.
pub fn animated_colors(t: f32) -> [[f32; 3]; VERTEX_COUNT] {
    let s = t.sin();
    [[s, 0.0, 0.0], [0.0, s, 0.0], [0.0, 0.0, s]]
}

/// Byte offset of the color of vertex `index` inside the vertex buffer.
pub fn color_offset(index: usize) -> usize {
    index * STRIDE + COLOR_OFFSET
}
