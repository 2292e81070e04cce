use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use image::RgbaImage;
use log::{error, info, warn};
use pollster::block_on;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use primview::scene::Primitive;
use primview::{App, Renderer, Scene};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;

    let scene = Scene::demo();
    println!(
        "Loaded scene with {} objects ({} lights)",
        scene.objects.len(),
        scene.lights.len()
    );
    for object in &scene.objects {
        println!(" - {} ({})", object.name, primitive_label(object.primitive));
    }

    if options.summary_only {
        return Ok(());
    }

    let texture = load_texture_or_placeholder(&options.texture);

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = ViewerApp {
        window: None,
        renderer: None,
        app: None,
        texture,
        last_error: None,
    };
    event_loop
        .run_app(&mut viewer)
        .context("event loop failed")?;

    if let Some(err) = viewer.last_error {
        return Err(err);
    }
    Ok(())
}

fn load_texture_or_placeholder(path: &Path) -> RgbaImage {
    match primview::load_texture(path) {
        Ok(image) => image,
        Err(err) => {
            warn!("{err}; using the built-in placeholder");
            primview::placeholder_texture()
        }
    }
}

fn primitive_label(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Box { .. } => "box",
        Primitive::Icosahedron { .. } => "icosahedron",
        Primitive::Torus { .. } => "torus",
    }
}

/// Winit application handler driving the render loop.
struct ViewerApp {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    app: Option<App>,
    texture: RgbaImage,
    last_error: Option<anyhow::Error>,
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.last_error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Primview")
            .with_inner_size(LogicalSize::new(1280.0, 720.0));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.fail(event_loop, anyhow!("failed to create window: {err}"));
                return;
            }
        };

        let size = window.inner_size();
        let app = App::new(size.width, size.height);

        let renderer = match block_on(Renderer::new(
            Arc::clone(&window),
            app.meshes(),
            &self.texture,
        )) {
            Ok(renderer) => renderer,
            Err(err) => {
                self.fail(event_loop, err.context("failed to initialize renderer"));
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.app = Some(app);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let (Some(window), Some(renderer), Some(app)) =
            (&self.window, &mut self.renderer, &mut self.app)
        else {
            return;
        };
        if id != window.id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                renderer.resize(size);
                app.resized(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                app.pointer_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::RedrawRequested => {
                app.tick();
                renderer.update_globals(&app.camera_params(), &app.scene().lights);
                if let Err(err) = renderer.render(&app.scene().objects) {
                    match err {
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                            let size = window.inner_size();
                            renderer.resize(size);
                        }
                        wgpu::SurfaceError::OutOfMemory => {
                            error!("GPU is out of memory");
                            self.last_error = Some(anyhow!("GPU is out of memory"));
                            event_loop.exit();
                            return;
                        }
                        wgpu::SurfaceError::Timeout => {
                            info!("surface timeout; retrying next frame");
                        }
                        wgpu::SurfaceError::Other => {
                            info!("surface error; retrying next frame");
                        }
                    }
                }
                window.request_redraw();
            }
            _ => {}
        }
    }
}

struct CliOptions {
    texture: PathBuf,
    summary_only: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut texture = PathBuf::from("paint.jpg");
        let mut summary_only = false;
        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--texture" => {
                    let Some(path) = args.next() else {
                        return Err(anyhow!("--texture requires a path"));
                    };
                    texture = PathBuf::from(path);
                }
                "--summary-only" => summary_only = true,
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Usage: primview [--texture <path>] [--summary-only]"
                    ));
                }
            }
        }
        Ok(Self {
            texture,
            summary_only,
        })
    }
}
