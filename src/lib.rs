//! # driftfield
//!
//! A drifting particle backdrop: a few hundred soft dots that breathe in
//! size and opacity, sink under a gentle gravity, wrap around the edges of
//! the field, and get kicked around by pointer movement.
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftfield::prelude::*;
//!
//! fn main() -> Result<(), BackdropError> {
//!     Backdrop::new()
//!         .with_config(ParticleConfig::default().with_particle_count(150))
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`ParticleState`] is position, velocity, size, opacity and a fixed
//! color. [`ParticleState::advance`] runs one tick of the motion model:
//! gravity, soft speed limits (a fixed correction per tick, never a clamp),
//! edge wrapping, and triangle-wave opacity and size oscillation.
//!
//! ### Surfaces
//!
//! Particles draw through a [`Surface`]: one handle per particle, created at
//! spawn, updated every tick, destroyed with the particle. [`SpriteStore`]
//! is the built-in surface the GPU renderer draws from; implement the trait
//! to drive anything else (a DOM, a terminal, a test recorder).
//!
//! ### The system
//!
//! [`ParticleSystem`] owns the population and the surface. Hosts call
//! `tick()` once per frame, `on_pointer_move()` with pointer deltas and
//! `on_resize()` with new bounds. Small resizes resample only the particles
//! that fell outside; large ones (beyond `resize_threshold`, 30% by
//! default) respawn everything.
//!
//! ```ignore
//! let mut system = ParticleSystem::new(
//!     ParticleConfig::default(),
//!     Vec2::new(1280.0, 720.0),
//!     SpriteStore::new(),
//! );
//!
//! system.on_pointer_move(Vec2::new(8.0, -2.0));
//! system.tick();
//! ```
//!
//! ## Extras
//!
//! - [`headline`]: per-character random font cycling for a page headline
//! - [`fade`]: scroll-linked opacity for content blocks

mod backdrop;
pub mod color;
pub mod config;
pub mod error;
pub mod fade;
mod gpu;
pub mod headline;
pub mod particle;
pub mod pointer;
pub mod surface;
pub mod system;
pub mod time;

pub use backdrop::Backdrop;
pub use color::{Hsv, Rgb};
pub use config::{InitialOpacity, ParticleConfig};
pub use error::{BackdropError, ConfigError, GpuError};
pub use glam::Vec2;
pub use particle::{Particle, ParticleState};
pub use surface::{Sprite, SpriteInstance, SpriteStore, Surface};
pub use system::{ParticleSystem, ResizeOutcome};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use driftfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backdrop::Backdrop;
    pub use crate::color::Rgb;
    pub use crate::config::{InitialOpacity, ParticleConfig};
    pub use crate::error::BackdropError;
    pub use crate::headline::HeadlineStyler;
    pub use crate::pointer::PointerTracker;
    pub use crate::surface::{Sprite, SpriteStore, Surface};
    pub use crate::system::{ParticleSystem, ResizeOutcome};
    pub use crate::time::{Interval, Time};
    pub use crate::Vec2;
}
