use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use gallery_walk::camera::Camera;
use gallery_walk::cli::Cli;
use gallery_walk::placement;
use gallery_walk::renderer::Renderer;
use gallery_walk::scene::{self, Scene};
use gallery_walk::texture::{TextureId, TextureStore, WrapMode};
use gallery_walk::world_io;

use clap::Parser;

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 1024;
const INITIAL_WINDOW_HEIGHT: u32 = 768;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    camera: Camera,
    scene: Scene,
    textures: TextureStore,
    /// Textures queued for placement, waiting for their image to finish
    /// loading so the aspect ratio is known.
    pending_placements: Vec<TextureId>,
    next_image: usize,
    cursor_grabbed: bool,
    last_frame_time: Instant,
    frame_count: u32,
    fps_update_timer: f32,
}

impl App {
    fn new(cli: Cli) -> Self {
        let mut textures = TextureStore::new();
        let surface_image = cli
            .floor_texture
            .as_deref()
            .and_then(|path| match load_image(path) {
                Ok(image) => Some(image),
                Err(e) => {
                    log::warn!("floor texture unusable, using checkerboard: {e}");
                    None
                }
            })
            .unwrap_or_else(scene::checkerboard_image);
        let scene = Scene::with_room(&mut textures, surface_image);
        let camera = Camera::new(cli.fly);

        Self {
            cli,
            window: None,
            renderer: None,
            camera,
            scene,
            textures,
            pending_placements: Vec::new(),
            next_image: 0,
            cursor_grabbed: false,
            last_frame_time: Instant::now(),
            frame_count: 0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            let fps = self.frame_count as f32 / self.fps_update_timer;
            log::info!("{fps:.1} fps, {} objects", self.scene.objects().len());
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    /// Start loading the next configured image; the panel is placed once the
    /// texture completes.
    fn queue_placement(&mut self) {
        if self.cli.images.is_empty() {
            log::warn!("no images configured; pass --image <path-or-url>");
            return;
        }

        let source = self.cli.images[self.next_image % self.cli.images.len()].clone();
        self.next_image += 1;

        let id = if source.starts_with("http://") || source.starts_with("https://") {
            self.textures.load_url(&source, WrapMode::Clamp, 1.0, 1.0)
        } else {
            self.textures
                .load_file(source.clone().into(), WrapMode::Clamp, 1.0, 1.0)
        };
        log::info!("loading {source} for placement");
        self.pending_placements.push(id);
    }

    /// Place every queued picture whose texture has finished loading, using
    /// the camera pose at completion time (as the original's load callback
    /// did). Failed loads are dropped with a diagnostic.
    fn drain_placements(&mut self) {
        let mut still_pending = Vec::new();
        for id in self.pending_placements.drain(..) {
            if self.textures.is_pending(id) {
                still_pending.push(id);
                continue;
            }
            if !self.textures.is_ready(id) {
                log::warn!("dropping placement: image failed to load");
                continue;
            }
            let aspect = self.textures.aspect_ratio(id);
            match placement::place(&self.camera.pose, id, aspect) {
                Ok(object) => {
                    log::info!("placed picture at {:?}", object.position);
                    self.scene.add(object);
                }
                Err(e) => log::warn!("placement dropped: {e}"),
            }
        }
        self.pending_placements = still_pending;
    }

    fn save_scene(&self) {
        match world_io::save_scene_file(&self.cli.save_path, &self.scene, &self.textures) {
            Ok(()) => log::info!(
                "saved {} objects to {}",
                self.scene.placed().len(),
                self.cli.save_path.display()
            ),
            Err(e) => log::error!("save failed: {e:#}"),
        }
    }

    fn load_scene(&mut self) {
        let Some(path) = self.cli.scene.clone() else {
            log::warn!("no scene file configured; pass --scene <path>");
            return;
        };
        match world_io::load_scene_file(&path, &mut self.scene, &mut self.textures) {
            Ok(count) => log::info!("loaded {count} objects from {}", path.display()),
            Err(e) => log::error!("load failed, scene unchanged: {e:#}"),
        }
    }

    fn grab_cursor(&mut self, grab: bool) {
        let Some(window) = &self.window else {
            return;
        };
        if grab {
            let result = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            match result {
                Ok(()) => {
                    window.set_cursor_visible(false);
                    self.cursor_grabbed = true;
                }
                Err(e) => log::warn!("cursor grab unavailable: {e}"),
            }
        } else {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                log::warn!("cursor release failed: {e}");
            }
            window.set_cursor_visible(true);
            self.cursor_grabbed = false;
        }
    }

    fn handle_key(&mut self, event: &KeyEvent, event_loop: &ActiveEventLoop) {
        if event.state == ElementState::Pressed {
            if let PhysicalKey::Code(code) = event.physical_key {
                match code {
                    KeyCode::Escape => {
                        if self.cursor_grabbed {
                            self.grab_cursor(false);
                        } else {
                            event_loop.exit();
                        }
                        return;
                    }
                    KeyCode::F5 => {
                        self.save_scene();
                        return;
                    }
                    KeyCode::F9 => {
                        self.load_scene();
                        return;
                    }
                    KeyCode::KeyF => {
                        self.camera.fly = !self.camera.fly;
                        log::info!("fly mode {}", if self.camera.fly { "on" } else { "off" });
                        return;
                    }
                    KeyCode::KeyP => {
                        self.queue_placement();
                        return;
                    }
                    _ => {}
                }
            }
        }
        self.camera.input.process_keyboard(event);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.update_fps(delta);

        self.camera.update();
        self.textures.poll();
        self.drain_placements();

        let Some(renderer) = &mut self.renderer else {
            return;
        };
        match renderer.render(&self.camera.pose, &self.scene, &self.textures) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = renderer.size();
                renderer.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("frame skipped: {e}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Gallery Walk")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(window.clone())) {
            Ok(r) => r,
            Err(e) => {
                log::error!("failed to initialize renderer: {e}");
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.renderer = Some(renderer);

        if self.cli.scene.is_some() {
            self.load_scene();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(&event, event_loop),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => match button {
                MouseButton::Left => {
                    if !self.cursor_grabbed {
                        self.grab_cursor(true);
                    }
                }
                MouseButton::Right => self.queue_placement(),
                _ => {}
            },
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        // Mouse look only while the cursor is captured.
        if self.cursor_grabbed {
            if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
                self.camera.input.add_look_delta(dx as f32, dy as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_image(path: &Path) -> Result<image::RgbaImage> {
    let bytes = std::fs::read(path)?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);

    log::info!(
        "Gallery Walk - WASD to move, click to capture the mouse, \
         right click to place a picture, F5 save, F9 load, Escape to release/quit"
    );
    event_loop.run_app(&mut app)?;

    Ok(())
}
