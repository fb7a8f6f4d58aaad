use crate::renderer::backend::GlBackend;
use glutin::{Api, ContextBuilder, GlProfile, GlRequest};
use std::panic;
use thiserror::Error;
use winit::event_loop::EventLoop;

pub const DIMS: (u32, u32) = (1200, 800);
pub const TITLE: &str = "OpenGL";
pub const GL_VERSION: (u8, u8) = (3, 3);

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to initialize the windowing system")]
    EventLoop,
    #[error("failed to create window and GL context: {0}")]
    Creation(#[from] glutin::CreationError),
    #[error("failed to make GL context current: {0}")]
    MakeCurrent(glutin::ContextError),
    #[error("failed to load OpenGL {}.{} entry points", GL_VERSION.0, GL_VERSION.1)]
    Loader,
}

/// Opens the fixed-size window with a current core-profile context and
/// loaded entry points.
pub fn create() -> Result<(EventLoop<()>, GlBackend), Error> {
    // winit reports a missing display server by panicking.
    let event_loop = panic::catch_unwind(EventLoop::new).map_err(|_| Error::EventLoop)?;
    let wb = winit::window::WindowBuilder::new()
        .with_title(TITLE)
        .with_inner_size(winit::dpi::Size::Physical(winit::dpi::PhysicalSize::new(
            DIMS.0, DIMS.1,
        )))
        .with_resizable(false);

    let windowed_context = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, GL_VERSION))
        .with_gl_profile(GlProfile::Core)
        .build_windowed(wb, &event_loop)?;

    let windowed_context = unsafe { windowed_context.make_current() }
        .map_err(|(_, err)| Error::MakeCurrent(err))?;

    let backend = GlBackend::load(windowed_context).ok_or(Error::Loader)?;
    Ok((event_loop, backend))
}
