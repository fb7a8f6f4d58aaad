use gl::types::{GLchar, GLint, GLsizei, GLsizeiptr, GLuint};
use glutin::{PossiblyCurrent, WindowedContext};
use std::ffi::{c_void, CStr};
use std::fmt;
use std::os::raw::c_char;

#[cfg(test)]
pub mod fake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// The slice of OpenGL the renderer drives.
///
/// Buffer operations act on whatever is bound to the array-buffer target,
/// the same way the underlying API does.
pub trait Backend {
    type Buffer: Copy + fmt::Debug;
    type VertexArray: Copy + fmt::Debug;
    type Shader: Copy + fmt::Debug;
    type Program: Copy + fmt::Debug;
    type PresentError: fmt::Display;

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);

    fn create_vertex_array(&mut self) -> Self::VertexArray;
    fn bind_vertex_array(&mut self, vertex_array: Option<Self::VertexArray>);

    fn create_buffer(&mut self) -> Self::Buffer;
    fn bind_array_buffer(&mut self, buffer: Option<Self::Buffer>);
    /// Allocates the bound array buffer with `data`, static-draw usage.
    fn array_buffer_data(&mut self, data: &[u8]);
    /// Overwrites `data.len()` bytes of the bound array buffer at `offset`.
    fn array_buffer_sub_data(&mut self, offset: usize, data: &[u8]);
    /// Describes attribute `location` as `size` floats and enables it.
    fn float_attribute(&mut self, location: u32, size: i32, stride: usize, offset: usize);

    fn create_shader(&mut self, stage: ShaderStage) -> Self::Shader;
    fn compile_shader(&mut self, shader: Self::Shader, source: &str);
    fn shader_compiled(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&mut self, shader: Self::Shader);

    fn create_program(&mut self) -> Self::Program;
    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader);
    fn link_program(&mut self, program: Self::Program);
    fn program_linked(&self, program: Self::Program) -> bool;
    fn validate_program(&mut self, program: Self::Program);
    fn program_validated(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&mut self, program: Option<Self::Program>);

    fn clear(&mut self, color: [f32; 4]);
    fn draw_triangles(&mut self, first: i32, count: i32);
    fn present(&mut self) -> Result<(), Self::PresentError>;
}

/// `Backend` over the loaded `gl` entry points of a current windowed context.
pub struct GlBackend {
    context: WindowedContext<PossiblyCurrent>,
}

impl GlBackend {
    /// Loads GL entry points from `context`; `None` when the driver is missing
    /// functions the renderer calls.
    pub fn load(context: WindowedContext<PossiblyCurrent>) -> Option<Self> {
        gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);

        let loaded = gl::GenVertexArrays::is_loaded()
            && gl::BufferSubData::is_loaded()
            && gl::CreateShader::is_loaded()
            && gl::ValidateProgram::is_loaded()
            && gl::DrawArrays::is_loaded();
        if loaded {
            Some(GlBackend { context })
        } else {
            None
        }
    }

    pub fn version(&self) -> String {
        unsafe {
            let version = gl::GetString(gl::VERSION);
            if version.is_null() {
                return String::new();
            }
            CStr::from_ptr(version as *const c_char)
                .to_string_lossy()
                .into_owned()
        }
    }

    fn read_log(len: GLint, read: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
        let mut buf = vec![0u8; len.max(1) as usize];
        let mut written: GLsizei = 0;
        read(buf.len() as GLsizei, &mut written, buf.as_mut_ptr() as *mut GLchar);
        buf.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Backend for GlBackend {
    type Buffer = GLuint;
    type VertexArray = GLuint;
    type Shader = GLuint;
    type Program = GLuint;
    type PresentError = glutin::ContextError;

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { gl::Viewport(x, y, width, height) }
    }

    fn create_vertex_array(&mut self) -> GLuint {
        let mut vertex_array = 0;
        unsafe { gl::GenVertexArrays(1, &mut vertex_array) };
        vertex_array
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<GLuint>) {
        unsafe { gl::BindVertexArray(vertex_array.unwrap_or(0)) }
    }

    fn create_buffer(&mut self) -> GLuint {
        let mut buffer = 0;
        unsafe { gl::GenBuffers(1, &mut buffer) };
        buffer
    }

    fn bind_array_buffer(&mut self, buffer: Option<GLuint>) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, buffer.unwrap_or(0)) }
    }

    fn array_buffer_data(&mut self, data: &[u8]) {
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            )
        }
    }

    fn array_buffer_sub_data(&mut self, offset: usize, data: &[u8]) {
        unsafe {
            gl::BufferSubData(
                gl::ARRAY_BUFFER,
                offset as isize,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
            )
        }
    }

    fn float_attribute(&mut self, location: u32, size: i32, stride: usize, offset: usize) {
        unsafe {
            gl::VertexAttribPointer(
                location,
                size,
                gl::FLOAT,
                gl::FALSE,
                stride as GLsizei,
                offset as *const c_void,
            );
            gl::EnableVertexAttribArray(location);
        }
    }

    fn create_shader(&mut self, stage: ShaderStage) -> GLuint {
        let kind = match stage {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        };
        unsafe { gl::CreateShader(kind) }
    }

    fn compile_shader(&mut self, shader: GLuint, source: &str) {
        let text = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe {
            gl::ShaderSource(shader, 1, &text, &len);
            gl::CompileShader(shader);
        }
    }

    fn shader_compiled(&self, shader: GLuint) -> bool {
        let mut status = GLint::from(gl::FALSE);
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status) };
        status == GLint::from(gl::TRUE)
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };
        Self::read_log(len, |capacity, written, buf| unsafe {
            gl::GetShaderInfoLog(shader, capacity, written, buf)
        })
    }

    fn delete_shader(&mut self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&mut self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&mut self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&mut self, program: GLuint) {
        unsafe { gl::LinkProgram(program) }
    }

    fn program_linked(&self, program: GLuint) -> bool {
        let mut status = GLint::from(gl::FALSE);
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut status) };
        status == GLint::from(gl::TRUE)
    }

    fn validate_program(&mut self, program: GLuint) {
        unsafe { gl::ValidateProgram(program) }
    }

    fn program_validated(&self, program: GLuint) -> bool {
        let mut status = GLint::from(gl::FALSE);
        unsafe { gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut status) };
        status == GLint::from(gl::TRUE)
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };
        Self::read_log(len, |capacity, written, buf| unsafe {
            gl::GetProgramInfoLog(program, capacity, written, buf)
        })
    }

    fn use_program(&mut self, program: Option<GLuint>) {
        unsafe { gl::UseProgram(program.unwrap_or(0)) }
    }

    fn clear(&mut self, [r, g, b, a]: [f32; 4]) {
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        unsafe { gl::DrawArrays(gl::TRIANGLES, first, count) }
    }

    fn present(&mut self) -> Result<(), glutin::ContextError> {
        self.context.swap_buffers()
    }
}
