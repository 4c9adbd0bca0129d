use std::any::Any;
use std::env;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use glam::{Mat4, Vec2};
use log::{error, info};
use pollster::block_on;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyEvent, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, WindowBuilder};

use globe_viewer::{
    generate_uv_sphere, DirectionalLight, FlyCamera, InputState, KeyCode, Renderer, SphereMesh,
    TextureImage,
};

const WINDOW_WIDTH: f64 = 800.0;
const WINDOW_HEIGHT: f64 = 600.0;
const DEFAULT_RESOLUTION: u32 = 50;
/// Idle spin of the globe, matching one tenth of a degree per frame at
/// sixty frames per second.
const IDLE_SPIN_DEGREES_PER_SECOND: f32 = 6.0;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let mesh = generate_uv_sphere(options.resolution);

    if options.mesh_info {
        print_mesh_info(&mesh, options.resolution);
        return Ok(());
    }

    let texture = load_texture(options.texture.as_deref());
    match run_interactive(&mesh, &texture) {
        Ok(()) => Ok(()),
        Err(err) => {
            if err.downcast_ref::<WindowInitError>().is_some() {
                eprintln!(
                    "{err}. Falling back to --mesh-info mode (set DISPLAY or install X11 libs to enable rendering)."
                );
                print_mesh_info(&mesh, options.resolution);
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}

fn print_mesh_info(mesh: &SphereMesh, resolution: u32) {
    println!(
        "Sphere resolution {resolution}: {} vertices, {} triangles ({} indices)",
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.index_count()
    );
}

fn load_texture(path: Option<&str>) -> TextureImage {
    match path {
        Some(path) => match TextureImage::from_path(path) {
            Ok(texture) => {
                info!(
                    "loaded texture {path} ({}x{})",
                    texture.width, texture.height
                );
                texture
            }
            Err(err) => {
                error!("{err:#}; using the checkerboard fallback");
                TextureImage::checkerboard(256, 32)
            }
        },
        None => TextureImage::checkerboard(256, 32),
    }
}

fn run_interactive(mesh: &SphereMesh, texture: &TextureImage) -> Result<()> {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let event_loop = panic::catch_unwind(AssertUnwindSafe(EventLoop::new));
    panic::set_hook(default_hook);
    let event_loop = event_loop
        .map_err(|panic| WindowInitError::from_panic("event loop", panic))?
        .map_err(|err| WindowInitError::from_error("event loop", err))?;

    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Globe Viewer")
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .build(&event_loop)
            .map_err(|err| WindowInitError::from_error("window", err))?,
    );

    let renderer = block_on(Renderer::new(Arc::clone(&window), mesh, texture))?;

    let mut camera = FlyCamera::default();
    let size = window.inner_size();
    if size.height > 0 {
        camera.set_aspect_ratio(size.width as f32 / size.height as f32);
    }

    let mut app = AppState {
        renderer,
        camera,
        input: InputState::new(),
        light: DirectionalLight::default(),
        // Earth-style tilt before the idle spin takes over.
        model: Mat4::from_rotation_x(270f32.to_radians())
            * Mat4::from_rotation_z(270f32.to_radians()),
        frame_time: Instant::now(),
        last_error: None,
    };

    event_loop.run(|event, target| {
        target.set_control_flow(ControlFlow::Poll);
        if let Err(err) = app.process_event(event, target) {
            app.last_error = Some(err);
            target.exit();
        }
    })?;

    if let Some(err) = app.last_error {
        return Err(err);
    }

    Ok(())
}

struct AppState {
    renderer: Renderer,
    camera: FlyCamera,
    input: InputState,
    light: DirectionalLight,
    model: Mat4,
    frame_time: Instant,
    last_error: Option<anyhow::Error>,
}

impl AppState {
    fn process_event(
        &mut self,
        event: Event<()>,
        target: &EventLoopWindowTarget<()>,
    ) -> Result<()> {
        match event {
            Event::WindowEvent { event, window_id } if window_id == self.renderer.window_id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        target.exit();
                    }
                    WindowEvent::Resized(size) => {
                        self.renderer.resize(size);
                        if size.height > 0 {
                            self.camera
                                .set_aspect_ratio(size.width as f32 / size.height as f32);
                        }
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if self.handle_keyboard(&event) {
                            target.exit();
                        }
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        self.handle_mouse_button(state, button);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let position = Vec2::new(position.x as f32, position.y as f32);
                        if let Some(delta) = self.input.cursor_moved(position) {
                            self.camera.look(delta.x, delta.y);
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        self.redraw()?;
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                self.renderer.window().request_redraw();
            }
            _ => {}
        }
        Ok(())
    }

    /// Returns true when the key press requests exit.
    fn handle_keyboard(&mut self, event: &KeyEvent) -> bool {
        let Some(keycode) = map_keycode(event.physical_key) else {
            return false;
        };
        match event.state {
            ElementState::Pressed => {
                if keycode == KeyCode::Escape {
                    return true;
                }
                self.input.set_key_down(keycode);
            }
            ElementState::Released => self.input.set_key_up(keycode),
        }
        false
    }

    fn handle_mouse_button(&mut self, state: ElementState, button: WinitMouseButton) {
        if button != WinitMouseButton::Left {
            return;
        }
        let window = self.renderer.window();
        match state {
            ElementState::Pressed => {
                // Cursor grab is best effort; some platforms only
                // support one of the modes.
                let _ = window
                    .set_cursor_grab(CursorGrabMode::Confined)
                    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
                window.set_cursor_visible(false);
                self.input.begin_mouse_look();
            }
            ElementState::Released => {
                let _ = window.set_cursor_grab(CursorGrabMode::None);
                window.set_cursor_visible(true);
                self.input.end_mouse_look();
            }
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let now = Instant::now();
        let delta_time = now.duration_since(self.frame_time).as_secs_f32();
        self.frame_time = now;

        if !self.input.mouse_look_active() {
            let angle = (IDLE_SPIN_DEGREES_PER_SECOND * delta_time).to_radians();
            self.model *= Mat4::from_rotation_z(angle);
        }

        if self.input.is_key_down(KeyCode::Character('W')) {
            self.camera.move_forward(delta_time);
        }
        if self.input.is_key_down(KeyCode::Character('S')) {
            self.camera.move_forward(-delta_time);
        }
        if self.input.is_key_down(KeyCode::Character('A')) {
            self.camera.move_right(-delta_time);
        }
        if self.input.is_key_down(KeyCode::Character('D')) {
            self.camera.move_right(delta_time);
        }

        self.renderer
            .update_globals(&self.camera, self.model, &self.light);
        if let Err(err) = self.renderer.render() {
            match err {
                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                    let size = self.renderer.window().inner_size();
                    self.renderer.resize(size);
                }
                wgpu::SurfaceError::Timeout => {
                    info!("Surface timeout; retrying next frame");
                }
                other => {
                    return Err(anyhow!("failed to acquire surface frame: {other}"));
                }
            }
        }
        Ok(())
    }
}

fn map_keycode(key: PhysicalKey) -> Option<KeyCode> {
    use winit::keyboard::KeyCode as Key;
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    Some(match code {
        Key::KeyW => KeyCode::Character('W'),
        Key::KeyA => KeyCode::Character('A'),
        Key::KeyS => KeyCode::Character('S'),
        Key::KeyD => KeyCode::Character('D'),
        Key::Escape => KeyCode::Escape,
        _ => return None,
    })
}

#[derive(Debug)]
struct WindowInitError {
    message: String,
}

impl WindowInitError {
    fn from_panic(stage: &str, panic: Box<dyn Any + Send>) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {}", panic_message(panic)),
        }
    }

    fn from_error(stage: &str, err: impl fmt::Display) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {err}"),
        }
    }
}

impl fmt::Display for WindowInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WindowInitError {}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(msg) => *msg,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(msg) => (*msg).to_string(),
            Err(_) => "unknown panic".into(),
        },
    }
}

struct CliOptions {
    texture: Option<String>,
    resolution: u32,
    mesh_info: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut texture = None;
        let mut resolution = DEFAULT_RESOLUTION;
        let mut mesh_info = false;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--mesh-info" => mesh_info = true,
                "--resolution" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--resolution requires a value"))?;
                    resolution = value
                        .parse()
                        .with_context(|| format!("invalid resolution: {value}"))?;
                }
                flag if flag.starts_with("--") => {
                    return Err(anyhow!(
                        "Unknown argument: {flag}. Expected [texture] [--resolution N] [--mesh-info]"
                    ));
                }
                path => {
                    if texture.is_some() {
                        return Err(anyhow!("more than one texture path given"));
                    }
                    texture = Some(path.to_string());
                }
            }
        }
        Ok(Self {
            texture,
            resolution,
            mesh_info,
        })
    }
}
