//! TCFU entry point
//!
//! Parses the command line, loads settings and sprites, then drives the
//! session from a winit event loop at a fixed 60 Hz tick.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use tcfu::consts::*;
use tcfu::renderer::{RenderState, build_scene};
use tcfu::sprite::SpriteSet;
use tcfu::{Flow, Key, Session, Settings, SpriteMode};

const WINDOW_TITLE: &str = "They Crawled from Uranus Replica";

#[derive(Parser, Debug)]
#[command(version, about = "Orbital arcade shooter")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed seed; every game of the session becomes reproducible
    #[arg(long)]
    seed: Option<u64>,

    /// Sprite strategy: procedural or image
    #[arg(long, value_parser = parse_sprite_mode)]
    sprites: Option<SpriteMode>,

    /// Enemy image used with `--sprites image`
    #[arg(long)]
    enemy_image: Option<PathBuf>,
}

fn parse_sprite_mode(s: &str) -> Result<SpriteMode, String> {
    SpriteMode::from_str(s).ok_or_else(|| format!("unknown sprite mode '{s}'"))
}

impl Args {
    /// Settings file (or defaults) with command-line overrides applied
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(mode) = self.sprites {
            settings.sprites = mode;
        }
        if let Some(path) = &self.enemy_image {
            settings.enemy_image = path.clone();
        }
        Ok(settings)
    }
}

/// Map a physical key to its game meaning
fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Key::RotateLeft),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Key::RotateRight),
        KeyCode::Space => Some(Key::Fire),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::Confirm),
        KeyCode::Escape => Some(Key::Back),
        KeyCode::KeyI => Some(Key::Instructions),
        _ => None,
    }
}

struct App {
    session: Session,
    sprites: SpriteSet,
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    tick_interval: Duration,
    next_tick: Instant,
    /// Fatal error that stopped the event loop
    error: Option<anyhow::Error>,
}

impl App {
    fn new(session: Session, sprites: SpriteSet) -> Self {
        Self {
            session,
            sprites,
            window: None,
            render_state: None,
            tick_interval: Duration::from_secs_f64(1.0 / TICK_RATE as f64),
            next_tick: Instant::now(),
            error: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("Failed to create window")?,
        );

        let render_state = pollster::block_on(RenderState::new(window.clone()))?;
        self.window = Some(window);
        self.render_state = Some(render_state);
        self.next_tick = Instant::now();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(key) = map_key(code) else {
            return;
        };
        match event.state {
            ElementState::Pressed if event.repeat => {}
            ElementState::Pressed => {
                if self.session.key_pressed(key) == Flow::Quit {
                    event_loop.exit();
                }
            }
            ElementState::Released => self.session.key_released(key),
        }
    }

    /// Render the current frame
    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_state) = self.render_state.as_mut() else {
            return;
        };
        let vertices = build_scene(&self.session, &self.sprites);
        match render_state.render(&vertices) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_state.resize(render_state.size.0, render_state.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow::anyhow!("GPU out of memory"));
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.session.quit();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(render_state) = self.render_state.as_mut() {
                    render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::RedrawRequested => self.render(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_tick {
            // One tick per deadline; missed frames are not caught up
            self.session.update();
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_tick = now + self.tick_interval;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("TCFU starting...");

    let settings = args.settings()?;
    let loader = settings.loader();
    log::info!("Sprite mode: {}", loader.describe());
    let sprites = loader.load().context("Failed to load sprites")?;

    let session = Session::new(settings.rules.clone(), args.seed);
    let mut app = App::new(session, sprites);

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop
        .run_app(&mut app)
        .context("Event loop failed")?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
