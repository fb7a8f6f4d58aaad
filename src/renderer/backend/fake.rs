//! Records what the renderer asks of the GPU so tests can inspect it.

use super::{Backend, ShaderStage};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Viewport(i32, i32, i32, i32),
    BindVertexArray(Option<u32>),
    BindArrayBuffer(Option<u32>),
    BufferData(usize),
    BufferSubData { offset: usize, len: usize },
    UseProgram(Option<u32>),
    Clear([f32; 4]),
    Draw { first: i32, count: i32 },
    Present,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attribute {
    pub location: u32,
    pub size: i32,
    pub stride: usize,
    pub offset: usize,
}

#[derive(Debug)]
pub struct Shader {
    pub stage: ShaderStage,
    pub compiled: bool,
    pub deleted: bool,
}

#[derive(Debug, Default)]
pub struct Program {
    pub shaders: Vec<u32>,
    pub linked: bool,
    pub validated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draw {
    pub vertex_array: Option<u32>,
    pub program: Option<u32>,
    pub first: i32,
    pub count: i32,
}

/// A shader "compiles" when its source declares `main`; a program links when
/// it holds one compiled shader of each stage.
#[derive(Debug, Default)]
pub struct FakeBackend {
    next_id: u32,
    pub calls: Vec<Call>,
    pub buffers: HashMap<u32, Vec<u8>>,
    pub attributes: HashMap<u32, Vec<Attribute>>,
    pub shaders: HashMap<u32, Shader>,
    pub programs: HashMap<u32, Program>,
    pub draws: Vec<Draw>,
    pub bound_vertex_array: Option<u32>,
    pub bound_buffer: Option<u32>,
    pub current_program: Option<u32>,
    pub fail_present: bool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn bound_data(&mut self) -> &mut Vec<u8> {
        let buffer = self.bound_buffer.expect("no array buffer bound");
        self.buffers.get_mut(&buffer).expect("unknown buffer")
    }

    pub fn buffer_floats(&self, buffer: u32) -> Vec<f32> {
        self.buffers[&buffer]
            .chunks_exact(4)
            .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
            .collect()
    }
}

impl Backend for FakeBackend {
    type Buffer = u32;
    type VertexArray = u32;
    type Shader = u32;
    type Program = u32;
    type PresentError = &'static str;

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(Call::Viewport(x, y, width, height));
    }

    fn create_vertex_array(&mut self) -> u32 {
        let id = self.next_id();
        self.attributes.insert(id, Vec::new());
        id
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<u32>) {
        self.calls.push(Call::BindVertexArray(vertex_array));
        self.bound_vertex_array = vertex_array;
    }

    fn create_buffer(&mut self) -> u32 {
        let id = self.next_id();
        self.buffers.insert(id, Vec::new());
        id
    }

    fn bind_array_buffer(&mut self, buffer: Option<u32>) {
        self.calls.push(Call::BindArrayBuffer(buffer));
        self.bound_buffer = buffer;
    }

    fn array_buffer_data(&mut self, data: &[u8]) {
        self.calls.push(Call::BufferData(data.len()));
        *self.bound_data() = data.to_vec();
    }

    fn array_buffer_sub_data(&mut self, offset: usize, data: &[u8]) {
        self.calls.push(Call::BufferSubData {
            offset,
            len: data.len(),
        });
        let bytes = self.bound_data();
        assert!(offset + data.len() <= bytes.len(), "sub-range past end");
        bytes[offset..offset + data.len()].copy_from_slice(data);
    }

    fn float_attribute(&mut self, location: u32, size: i32, stride: usize, offset: usize) {
        let vertex_array = self.bound_vertex_array.expect("no vertex array bound");
        self.attributes
            .get_mut(&vertex_array)
            .expect("unknown vertex array")
            .push(Attribute {
                location,
                size,
                stride,
                offset,
            });
    }

    fn create_shader(&mut self, stage: ShaderStage) -> u32 {
        let id = self.next_id();
        self.shaders.insert(
            id,
            Shader {
                stage,
                compiled: false,
                deleted: false,
            },
        );
        id
    }

    fn compile_shader(&mut self, shader: u32, source: &str) {
        self.shaders.get_mut(&shader).expect("unknown shader").compiled =
            source.contains("void main");
    }

    fn shader_compiled(&self, shader: u32) -> bool {
        self.shaders[&shader].compiled
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.shader_compiled(shader) {
            String::new()
        } else {
            "0:1(1): error: syntax error, unexpected end of file".to_owned()
        }
    }

    fn delete_shader(&mut self, shader: u32) {
        self.shaders.get_mut(&shader).expect("unknown shader").deleted = true;
    }

    fn create_program(&mut self) -> u32 {
        let id = self.next_id();
        self.programs.insert(id, Program::default());
        id
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        self.programs
            .get_mut(&program)
            .expect("unknown program")
            .shaders
            .push(shader);
    }

    fn link_program(&mut self, program: u32) {
        let attached = &self.programs[&program].shaders;
        let compiled = |stage| {
            attached
                .iter()
                .any(|id| self.shaders[id].stage == stage && self.shaders[id].compiled)
        };
        let linked = compiled(ShaderStage::Vertex) && compiled(ShaderStage::Fragment);
        self.programs.get_mut(&program).expect("unknown program").linked = linked;
    }

    fn program_linked(&self, program: u32) -> bool {
        self.programs[&program].linked
    }

    fn validate_program(&mut self, program: u32) {
        let program = self.programs.get_mut(&program).expect("unknown program");
        program.validated = program.linked;
    }

    fn program_validated(&self, program: u32) -> bool {
        self.programs[&program].validated
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_linked(program) {
            String::new()
        } else {
            "error: linking with uncompiled shader".to_owned()
        }
    }

    fn use_program(&mut self, program: Option<u32>) {
        self.calls.push(Call::UseProgram(program));
        self.current_program = program;
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.calls.push(Call::Clear(color));
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        self.calls.push(Call::Draw { first, count });
        self.draws.push(Draw {
            vertex_array: self.bound_vertex_array,
            program: self.current_program,
            first,
            count,
        });
    }

    fn present(&mut self) -> Result<(), &'static str> {
        self.calls.push(Call::Present);
        if self.fail_present {
            Err("context lost")
        } else {
            Ok(())
        }
    }
}
