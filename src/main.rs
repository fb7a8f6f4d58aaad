mod context;
mod renderer;

use renderer::Renderer;

use log::{error, info, trace};
use std::process;
use std::time::Instant;
use winit::event::{Event, WindowEvent};
use winit::event_loop::ControlFlow;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (event_loop, backend) = match context::create() {
        Ok(created) => created,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };
    let start = Instant::now();

    let (width, height) = context::DIMS;
    let mut renderer = Renderer::init(backend, width, height);
    info!("OpenGL {}", renderer.backend().version());
    let mut fps_counter = fps_counter::FPSCounter::new();

    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            info!("close requested");
            *control_flow = ControlFlow::Exit;
        }
        Event::MainEventsCleared if *control_flow != ControlFlow::Exit => {
            renderer.update(start.elapsed().as_secs_f32());
            trace!("fps: {}", fps_counter.tick());
        }
        _ => {}
    });
}
