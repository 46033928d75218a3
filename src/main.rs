use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use seascape::cli::Cli;
use seascape::config::AnimationConfig;
use seascape::core::{FrameDriver, InputUpdate, PointerInput, PointerPosition, SharedPointer};
use seascape::frame::{fixed_rate_frames, FpsCounter, FrameIterator};
use seascape::palette::{select_palette, PaletteConfig};
use seascape::renderer::{OverlayInfo, Renderer};
use seascape::scene::MemoryScene;
use seascape::scenes::build_world;
use seascape::time_of_day::TimeCategory;
use seascape::traits::{SceneGraph, Viewport, WindowContext};
use seascape::window::Window;

const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;
const FPS_UPDATE_INTERVAL: f32 = 1.0;
const HEADLESS_REFRESH_RATE: f32 = 60.0;

/// Scene plus the driver animating it
struct Animation {
    scene: MemoryScene,
    driver: FrameDriver,
}

impl Animation {
    fn build(
        cli: &Cli,
        palette: &PaletteConfig,
        config: &AnimationConfig,
        viewport: Viewport,
        pointer: SharedPointer,
    ) -> Result<Self> {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut scene = MemoryScene::new();
        let world = build_world(&mut scene, palette, config, viewport, &mut rng)
            .context("failed to build scene")?;
        let driver = FrameDriver::new(&scene, world, pointer, config)
            .context("scene is missing animated nodes")?;
        Ok(Self { scene, driver })
    }
}

fn run_headless(cli: &Cli, palette: &PaletteConfig, config: &AnimationConfig) -> Result<()> {
    let pointer = SharedPointer::new(cli.pointer.unwrap_or(PointerPosition::CENTER));
    let viewport = Viewport::new(INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT);
    let Animation {
        mut scene,
        mut driver,
    } = Animation::build(cli, palette, config, viewport, pointer)?;
    log::info!(
        "headless scene: {} nodes, {} vertices",
        scene.node_count(),
        scene.vertex_count()
    );

    let frames = fixed_rate_frames(HEADLESS_REFRESH_RATE).take(cli.ticks);
    let ran = driver.run(&mut scene, frames, |_, _| {});

    let pose = driver.pose().state();
    let body = scene.position(driver.handles().body);
    log::info!(
        "headless run finished: {} ticks, body y {:.2}, fov {:.2}",
        ran,
        body.y,
        pose.fov
    );
    if !cli.no_ui {
        println!(
            "{} ticks: height {:.2}, roll {:.4}, pitch {:.4}, fov {:.2}, sea spin {:.3}",
            ran,
            pose.position_y,
            pose.rotation_z,
            pose.rotation_x,
            pose.fov,
            driver.waves().rotation_z()
        );
    }
    Ok(())
}

// === Application ===

struct App {
    cli: Cli,
    category: TimeCategory,
    palette: &'static PaletteConfig,
    config: AnimationConfig,
    pointer: SharedPointer,
    window: Option<Window>,
    renderer: Option<Renderer>,
    input: Option<PointerInput>,
    animation: Option<Animation>,
    frames: FrameIterator,
    fps: FpsCounter,
}

impl App {
    fn new(cli: Cli, category: TimeCategory, config: AnimationConfig) -> Self {
        Self {
            cli,
            category,
            palette: select_palette(category),
            config,
            pointer: SharedPointer::default(),
            window: None,
            renderer: None,
            input: None,
            animation: None,
            frames: FrameIterator::new(),
            fps: FpsCounter::new(FPS_UPDATE_INTERVAL),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = winit::window::Window::default_attributes()
            .with_title("Seascape")
            .with_inner_size(winit::dpi::LogicalSize::new(
                INITIAL_WINDOW_WIDTH,
                INITIAL_WINDOW_HEIGHT,
            ));
        let window = Window::new(Arc::new(event_loop.create_window(attributes)?));

        let renderer = pollster::block_on(Renderer::new(window.inner().clone(), self.palette))?;
        let viewport = window.viewport();
        let animation = Animation::build(
            &self.cli,
            self.palette,
            &self.config,
            viewport,
            self.pointer.clone(),
        )?;

        self.input = Some(PointerInput::new(self.pointer.clone(), viewport));
        self.renderer = Some(renderer);
        self.animation = Some(animation);
        self.window = Some(window);
        self.frames = FrameIterator::new();
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(animation) = &self.animation {
            animation.driver.cancel_token().cancel();
            log::info!("stopping after {} ticks", animation.driver.ticks());
        }
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(frame) = self.frames.next() else {
            return;
        };

        let Some(animation) = &mut self.animation else {
            return;
        };
        if animation.driver.cancel_token().is_cancelled() {
            return;
        }
        animation.driver.tick(&mut animation.scene, &frame);
        let dirty = animation.scene.take_dirty();

        if let Some(fps) = self.fps.record(frame.delta) {
            log::info!("FPS: {:.1}", fps);
        }

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };
        let overlay = (!self.cli.no_ui).then(|| OverlayInfo {
            fps: self.fps.fps(),
            label: self.category.to_string(),
        });
        match renderer.render(window.inner(), &animation.scene, &dirty, overlay.as_ref()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                renderer.resize(window.viewport());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory");
                self.shutdown(event_loop);
            }
            Err(e) => log::warn!("render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("failed to start: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // The pointer always follows the cursor, even over the overlay
        if let Some(input) = &mut self.input {
            if let InputUpdate::Resized(viewport) = input.process_event(&event) {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(viewport);
                }
                if let Some(animation) = &mut self.animation {
                    animation.scene.set_camera_aspect(viewport.aspect());
                }
            }
        }

        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window.inner(), &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnimationConfig::load(path)?,
        None => AnimationConfig::default(),
    };
    let category = cli.time_category();
    let palette = select_palette(category);
    log::info!("time of day: {} ({})", category, palette.css_gradient());

    if cli.headless {
        return run_headless(&cli, palette, &config);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, category, config);

    log::info!("Seascape - move the pointer to steer the cat, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
