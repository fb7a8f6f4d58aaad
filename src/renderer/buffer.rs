use super::backend::Backend;
use super::vertex::{self, Vertex, COLOR_OFFSET, STRIDE};

pub const POSITION_LOCATION: u32 = 0;
pub const COLOR_LOCATION: u32 = 1;

/// One array buffer plus the vertex array describing its `Vertex` layout.
pub struct VertexBuffer<B: Backend> {
    pub buf: B::Buffer,
    pub vertex_array: B::VertexArray,
    pub len: usize,
}

impl<B: Backend> VertexBuffer<B> {
    /// Uploads `content` and records the attribute layout. Leaves both the
    /// vertex array and the buffer bound.
    pub fn new(backend: &mut B, content: &[Vertex]) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(content);
        assert_ne!(bytes.len(), 0);

        let vertex_array = backend.create_vertex_array();
        backend.bind_vertex_array(Some(vertex_array));

        let buf = backend.create_buffer();
        backend.bind_array_buffer(Some(buf));
        backend.array_buffer_data(bytes);

        backend.float_attribute(POSITION_LOCATION, 3, STRIDE, 0);
        backend.float_attribute(COLOR_LOCATION, 3, STRIDE, COLOR_OFFSET);

        VertexBuffer {
            buf,
            vertex_array,
            len: content.len(),
        }
    }

    /// Overwrites the color of each vertex in place, one sub-range per vertex.
    pub fn write_colors(&self, backend: &mut B, colors: &[[f32; 3]]) {
        assert!(colors.len() <= self.len);

        backend.bind_array_buffer(Some(self.buf));
        for (index, color) in colors.iter().enumerate() {
            backend.array_buffer_sub_data(vertex::color_offset(index), bytemuck::bytes_of(color));
        }
        backend.bind_array_buffer(None);
    }
}
