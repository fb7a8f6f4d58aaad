use log::{error, info};
use std::path::Path;

pub mod backend;
mod buffer;
mod pipeline;
mod vertex;

use backend::Backend;
use buffer::VertexBuffer;
use pipeline::Pipeline;
use vertex::{animated_colors, TRIANGLE, VERTEX_COUNT};

pub const VERTEX_SHADER_PATH: &str = "vertex.glsl";
pub const FRAGMENT_SHADER_PATH: &str = "fragment.glsl";

const CLEAR_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Owns every GPU object the triangle needs. Constructing one is the only
/// way to get a ready renderer; nothing is released before process exit.
pub struct Renderer<B: Backend> {
    backend: B,
    vertex_buffer: VertexBuffer<B>,
    pipeline: Pipeline<B>,
}

impl<B> Renderer<B>
where
    B: Backend,
{
    pub fn init(backend: B, width: u32, height: u32) -> Self {
        Self::with_shaders(
            backend,
            width,
            height,
            Path::new(VERTEX_SHADER_PATH),
            Path::new(FRAGMENT_SHADER_PATH),
        )
    }

    pub fn with_shaders(
        mut backend: B,
        width: u32,
        height: u32,
        vs_path: &Path,
        fs_path: &Path,
    ) -> Self {
        backend.viewport(0, 0, width as i32, height as i32);

        let vertex_buffer = VertexBuffer::new(&mut backend, &TRIANGLE);
        let pipeline = Pipeline::new(&mut backend, vs_path, fs_path);

        backend.bind_array_buffer(None);
        backend.bind_vertex_array(None);

        if pipeline.errors().is_empty() {
            info!("renderer ready");
        } else {
            info!(
                "renderer ready with {} shader error(s) (linked: {}, validated: {})",
                pipeline.errors().len(),
                pipeline.is_linked(),
                pipeline.is_validated()
            );
        }

        Renderer {
            backend,
            vertex_buffer,
            pipeline,
        }
    }

    /// Animates the vertex colors for `time` seconds, draws and presents.
    pub fn update(&mut self, time: f32) {
        let colors = animated_colors(time);
        self.vertex_buffer.write_colors(&mut self.backend, &colors);

        self.backend.clear(CLEAR_COLOR);

        self.backend.use_program(Some(self.pipeline.program));
        self.backend.bind_vertex_array(Some(self.vertex_buffer.vertex_array));
        self.backend.draw_triangles(0, VERTEX_COUNT as i32);
        self.backend.bind_vertex_array(None);

        if let Err(err) = self.backend.present() {
            error!("failed to present frame: {}", err);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
