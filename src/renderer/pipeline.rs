use super::backend::{Backend, ShaderStage};
use log::{error, warn};
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("program failed to link:\n{log}")]
    Link { log: String },
    #[error("program failed to validate:\n{log}")]
    Validate { log: String },
}

/// A linked vertex + fragment program.
///
/// Build failures are logged and kept in `errors`; the program object is
/// retained either way and draws with whatever the driver produced.
pub struct Pipeline<B: Backend> {
    pub program: B::Program,
    linked: bool,
    validated: bool,
    errors: Vec<Error>,
}

impl<B: Backend> Pipeline<B> {
    pub fn new(backend: &mut B, vs_path: &Path, fs_path: &Path) -> Self {
        let vs_source = load_source(vs_path);
        let fs_source = load_source(fs_path);
        Self::from_sources(backend, &vs_source, &fs_source)
    }

    pub fn from_sources(backend: &mut B, vs_source: &str, fs_source: &str) -> Self {
        let mut errors = Vec::new();

        let vs_module = Self::compile(backend, ShaderStage::Vertex, vs_source, &mut errors);
        let fs_module = Self::compile(backend, ShaderStage::Fragment, fs_source, &mut errors);

        let program = backend.create_program();
        backend.attach_shader(program, vs_module);
        backend.attach_shader(program, fs_module);

        backend.link_program(program);
        let linked = backend.program_linked(program);
        if !linked {
            let err = Error::Link {
                log: backend.program_info_log(program),
            };
            error!("{}", err);
            error!("vertex source:\n{}", vs_source);
            error!("fragment source:\n{}", fs_source);
            errors.push(err);
        }

        backend.validate_program(program);
        let validated = backend.program_validated(program);
        if !validated {
            let err = Error::Validate {
                log: backend.program_info_log(program),
            };
            error!("{}", err);
            errors.push(err);
        }

        backend.delete_shader(vs_module);
        backend.delete_shader(fs_module);

        Pipeline {
            program,
            linked,
            validated,
            errors,
        }
    }

    fn compile(
        backend: &mut B,
        stage: ShaderStage,
        source: &str,
        errors: &mut Vec<Error>,
    ) -> B::Shader {
        let shader = backend.create_shader(stage);
        backend.compile_shader(shader, source);
        if !backend.shader_compiled(shader) {
            let err = Error::Compile {
                stage,
                log: backend.shader_info_log(shader),
            };
            error!("{}", err);
            errors.push(err);
        }
        shader
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn is_validated(&self) -> bool {
        self.validated
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }
}

/// Reads shader text from `path`. An unreadable file yields empty source.
pub fn load_source(path: &Path) -> String {
    match read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            warn!("can't read shader {}: {}", path.display(), err);
            String::new()
        }
    }
}
