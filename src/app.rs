use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::animation;
use crate::camera::PerspectiveCamera;
use crate::cli::Cli;
use crate::controls::OrbitControls;
use crate::font::FontLoader;
use crate::frame::{wall_clock_seconds, FrameClock};
use crate::particles::{ParticleField, PARTICLE_SPREAD};
use crate::renderer::SceneRenderer;
use crate::resize::handle_resize;
use crate::scene::SceneState;

pub const INITIAL_WINDOW_WIDTH: u32 = 800;
pub const INITIAL_WINDOW_HEIGHT: u32 = 600;
pub const WINDOW_TITLE: &str = "Freedom Within";

pub struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    scene: Option<SceneState>,
    controls: OrbitControls,
    font: FontLoader,
    frame_clock: FrameClock,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            window: None,
            renderer: None,
            scene: None,
            controls: OrbitControls::new(INITIAL_WINDOW_HEIGHT),
            font: FontLoader::inert(),
            frame_clock: FrameClock::new(),
        }
    }

    fn build_scene(&self, width: u32, height: u32) -> SceneState {
        let particles = match self.cli.seed {
            Some(seed) => ParticleField::generate(
                self.cli.particles,
                PARTICLE_SPREAD,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => ParticleField::generate(
                self.cli.particles,
                PARTICLE_SPREAD,
                &mut rand::thread_rng(),
            ),
        };

        SceneState::new(PerspectiveCamera::for_viewport(width, height), particles)
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.frame_clock.tick();

        let (Some(scene), Some(renderer), Some(window)) =
            (&mut self.scene, &mut self.renderer, &self.window)
        else {
            return;
        };

        if let Some(typeface) = self.font.poll() {
            if scene.attach_text(&typeface) {
                log::info!(
                    "Text attached using '{}' at frame {}",
                    typeface.family_name(),
                    self.frame_clock.frame_number()
                );
            }
        }

        animation::tick(scene, wall_clock_seconds());
        self.controls.update(&mut scene.camera);

        match renderer.render(scene, window, self.frame_clock.fps()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {}", e),
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
                .with_title(WINDOW_TITLE)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let scene = self.build_scene(size.width, size.height);

        let renderer = match pollster::block_on(SceneRenderer::new(
            window.clone(),
            &scene,
            !self.cli.no_ui,
        )) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        // The scene renders without text until the font arrives
        self.font = match FontLoader::spawn(self.cli.font_source()) {
            Ok(loader) => loader,
            Err(e) => {
                log::warn!("Font loading disabled: {:#}", e);
                FontLoader::inert()
            }
        };

        self.controls.set_viewport_height(size.height);
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.scene = Some(scene);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
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
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let (Some(scene), Some(renderer)) = (&mut self.scene, &mut self.renderer) {
                    if handle_resize(&mut scene.camera, renderer, size.width, size.height) {
                        self.controls.set_viewport_height(size.height);
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                self.controls.handle_event(&other);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
