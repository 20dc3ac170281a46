//! Windowed host for a particle field.
//!
//! [`Backdrop`] opens a window, renders a [`ParticleSystem`] into it and
//! wires the window's events to the system:
//!
//! | Event | Action |
//! |-------|--------|
//! | redraw requested | `tick()`, render, request the next redraw |
//! | cursor moved | `on_pointer_move(delta)` |
//! | resized | `on_resize(logical size)` |
//! | close requested | `shutdown()` and exit |
//!
//! ```ignore
//! use driftfield::prelude::*;
//!
//! fn main() -> Result<(), BackdropError> {
//!     Backdrop::new()
//!         .with_config(ParticleConfig::default().with_particle_count(150))
//!         .with_headline("Hello, drifting world")
//!         .run()
//! }
//! ```

use crate::config::ParticleConfig;
use crate::error::{BackdropError, GpuError};
use crate::gpu::GpuState;
use crate::headline::HeadlineStyler;
use crate::pointer::PointerTracker;
use crate::surface::SpriteStore;
use crate::system::ParticleSystem;
use crate::time::{Interval, Time};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Builder for a windowed particle backdrop.
///
/// Use method chaining to configure, then call `.run()` to start.
pub struct Backdrop {
    config: ParticleConfig,
    title: String,
    window_size: (u32, u32),
    background: wgpu::Color,
    headline: Option<String>,
    seed: Option<u64>,
}

impl Backdrop {
    /// Create a backdrop with default settings.
    pub fn new() -> Self {
        Self {
            config: ParticleConfig::default(),
            title: "driftfield".to_string(),
            window_size: (1280, 720),
            background: wgpu::Color {
                r: 0.02,
                g: 0.02,
                b: 0.05,
                a: 1.0,
            },
            headline: None,
            seed: None,
        }
    }

    /// Set the particle constants.
    pub fn with_config(mut self, config: ParticleConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Set the background color (RGB, 0.0-1.0).
    pub fn with_background(mut self, r: f64, g: f64, b: f64) -> Self {
        self.background = wgpu::Color { r, g, b, a: 1.0 };
        self
    }

    /// Cycle fonts on a headline alongside the particles.
    ///
    /// The styled markup is emitted at `trace` level on every re-roll.
    pub fn with_headline(mut self, text: impl Into<String>) -> Self {
        self.headline = Some(text.into());
        self
    }

    /// Make the particle field reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run until the window is closed.
    pub fn run(self) -> Result<(), BackdropError> {
        self.config.validate()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    settings: Backdrop,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    system: Option<ParticleSystem<SpriteStore>>,
    pointer: PointerTracker,
    time: Time,
    title_refresh: Interval,
    headline: Option<HeadlineStyler>,
    rng: SmallRng,
    error: Option<BackdropError>,
}

impl App {
    fn new(settings: Backdrop) -> Self {
        let headline = settings.headline.as_deref().map(HeadlineStyler::new);
        let rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        Self {
            settings,
            window: None,
            gpu_state: None,
            system: None,
            pointer: PointerTracker::new(),
            time: Time::new(),
            title_refresh: Interval::new(1.0),
            headline,
            rng,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: BackdropError) {
        tracing::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), BackdropError> {
        let (width, height) = self.settings.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.pointer.set_scale_factor(window.scale_factor());

        let gpu_state =
            pollster::block_on(GpuState::new(window.clone(), self.settings.background))?;

        let bounds = logical_bounds(window.inner_size(), window.scale_factor());
        let config = self.settings.config.clone();
        let store = SpriteStore::new();
        let system = match self.settings.seed {
            Some(seed) => ParticleSystem::seeded(config, bounds, store, seed),
            None => ParticleSystem::new(config, bounds, store),
        };

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        self.system = Some(system);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.time.update();

        if let Some(headline) = &mut self.headline {
            if headline.update(dt, &mut self.rng) {
                tracing::trace!(markup = %headline.to_markup(), "headline");
            }
        }

        let mut out_of_memory = false;
        if let (Some(gpu_state), Some(system)) = (&mut self.gpu_state, &mut self.system) {
            system.tick();

            match gpu_state.render(system.surface()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu_state.reconfigure()
                }
                Err(wgpu::SurfaceError::OutOfMemory) => out_of_memory = true,
                Err(e) => tracing::warn!("Render error: {:?}", e),
            }
        }
        if out_of_memory {
            self.fail(event_loop, GpuError::OutOfMemory.into());
            return;
        }

        if let Some(window) = &self.window {
            if self.title_refresh.tick(dt) {
                window.set_title(&format!(
                    "{} - {:.0} fps",
                    self.settings.title,
                    self.time.fps()
                ));
            }
            window.request_redraw();
        }
    }

    fn shutdown(&mut self) {
        if let Some(system) = self.system.take() {
            system.shutdown();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                // Minimised windows report 0x0; keep the field as it was.
                if physical_size.width > 0 && physical_size.height > 0 {
                    if let (Some(window), Some(system)) = (&self.window, &mut self.system) {
                        system.on_resize(logical_bounds(physical_size, window.scale_factor()));
                    }
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.set_scale_factor(scale_factor);
                }
                self.pointer.handle_event(&event);
            }
            WindowEvent::CursorMoved { .. } | WindowEvent::CursorLeft { .. } => {
                if let Some(delta) = self.pointer.handle_event(&event) {
                    if let Some(system) = &mut self.system {
                        system.on_pointer_move(delta);
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

fn logical_bounds(size: PhysicalSize<u32>, scale_factor: f64) -> Vec2 {
    let logical: LogicalSize<f32> = size.to_logical(scale_factor);
    Vec2::new(logical.width, logical.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_bounds() {
        let bounds = logical_bounds(PhysicalSize::new(2560, 1440), 2.0);
        assert_eq!(bounds, Vec2::new(1280.0, 720.0));
    }

    #[test]
    fn test_builder_defaults() {
        let backdrop = Backdrop::new()
            .with_title("demo")
            .with_window_size(800, 600)
            .with_seed(4);
        assert_eq!(backdrop.title, "demo");
        assert_eq!(backdrop.window_size, (800, 600));
        assert_eq!(backdrop.seed, Some(4));
        assert_eq!(backdrop.config, ParticleConfig::default());
        assert!(backdrop.headline.is_none());
    }

    #[test]
    fn test_invalid_config_fails_before_window() {
        let result = Backdrop::new()
            .with_config(ParticleConfig::default().with_size_range(9.0, 1.0))
            .run();
        assert!(matches!(result, Err(BackdropError::Config(_))));
    }
}
