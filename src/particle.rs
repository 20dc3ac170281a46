//! A single self-animating particle.
//!
//! The motion model is deliberately simple and additive: velocity is
//! integrated into position once per tick, gravity nudges `vy` downward,
//! and speed limits are *soft*: a particle outside a limit is pulled back by
//! a fixed step per tick rather than clamped. Opacity and size each
//! oscillate between their bounds as triangle waves, overshooting a bound by
//! at most one step before turning around.
//!
//! # Tick order
//!
//! 1. `x += vx`
//! 2. `vy += gravity_gain`
//! 3. `y += vy`
//! 4. Soft speed correction on both axes against `max_speed`
//! 5. Soft falling-speed correction against `gravity_speed_limit`
//! 6. Wrap position into `[0, width) × [0, height)`
//! 7. Fade: turn around at the opacity bounds, then step
//! 8. Breathe: step size, then turn around at the size bounds

use crate::color::{random_particle_color, Rgb};
use crate::config::{InitialOpacity, ParticleConfig};
use crate::surface::{Sprite, Surface};
use glam::Vec2;
use rand::Rng;

/// The simulated state of one particle, independent of how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleState {
    /// Position in layout pixels, origin top-left, y down.
    pub position: Vec2,
    /// Velocity in pixels per tick.
    pub velocity: Vec2,
    pub size: f32,
    /// Signed size change per tick.
    pub size_rate: f32,
    pub opacity: f32,
    /// `+1.0` while brightening, `-1.0` while fading.
    pub fade_direction: f32,
    /// Fixed at creation.
    pub color: Rgb,
}

impl ParticleState {
    /// Draw a fresh particle somewhere inside `bounds`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2, config: &ParticleConfig) -> Self {
        let position = Vec2::new(sample_coord(rng, bounds.x), sample_coord(rng, bounds.y));
        let velocity = Vec2::new(
            symmetric(rng, config.initial_speed),
            symmetric(rng, config.initial_speed),
        );
        let opacity = match config.initial_opacity {
            InitialOpacity::Full => 1.0,
            InitialOpacity::Random => rng.gen::<f32>(),
        };
        let size = config.min_size + rng.gen::<f32>() * (config.max_size - config.min_size);

        Self {
            position,
            velocity,
            size,
            size_rate: random_sign(rng) * config.size_gain,
            opacity,
            fade_direction: random_sign(rng),
            color: random_particle_color(rng),
        }
    }

    /// Advance one simulation step inside a field of size `bounds`.
    pub fn advance(&mut self, config: &ParticleConfig, bounds: Vec2) {
        self.position.x += self.velocity.x;
        self.velocity.y += config.gravity_gain;
        self.position.y += self.velocity.y;

        self.velocity.x = soft_limit(self.velocity.x, config.max_speed, config.speed_limit_gain);
        self.velocity.y = soft_limit(self.velocity.y, config.max_speed, config.speed_limit_gain);
        if self.velocity.y > config.gravity_speed_limit {
            self.velocity.y -= config.gravity_limit_gain;
        }

        self.position.x = wrap(self.position.x, bounds.x);
        self.position.y = wrap(self.position.y, bounds.y);

        if self.opacity <= config.min_opacity {
            self.fade_direction = 1.0;
        } else if self.opacity >= config.max_opacity {
            self.fade_direction = -1.0;
        }
        self.opacity += self.fade_direction * config.fade_speed;

        self.size += self.size_rate;
        if self.size >= config.max_size {
            self.size_rate = -self.size_rate.abs();
        } else if self.size <= config.min_size {
            self.size_rate = self.size_rate.abs();
        }
    }

    /// Add a pointer impulse. No limit is applied here; the soft speed
    /// correction in [`advance`](Self::advance) bleeds it off over time.
    #[inline]
    pub fn push(&mut self, impulse: Vec2) {
        self.velocity += impulse;
    }

    pub fn sprite(&self) -> Sprite {
        Sprite {
            position: self.position,
            size: self.size,
            opacity: self.opacity,
            color: self.color,
        }
    }
}

/// A particle bound to a visual element on a [`Surface`].
///
/// The particle owns its handle; [`destroy`](Self::destroy) consumes both.
#[derive(Debug)]
pub struct Particle<H> {
    state: ParticleState,
    handle: H,
}

impl<H> Particle<H> {
    /// Create the particle's visual element and bind it.
    pub fn spawn<S>(surface: &mut S, state: ParticleState) -> Self
    where
        S: Surface<Handle = H> + ?Sized,
    {
        let handle = surface.create(&state.sprite());
        Self { state, handle }
    }

    /// Step the simulation and push the result to the surface.
    pub fn advance<S>(&mut self, config: &ParticleConfig, bounds: Vec2, surface: &mut S)
    where
        S: Surface<Handle = H> + ?Sized,
    {
        self.state.advance(config, bounds);
        surface.update(
            &self.handle,
            self.state.position,
            self.state.size,
            self.state.opacity,
        );
    }

    /// Release the visual element.
    pub fn destroy<S>(self, surface: &mut S)
    where
        S: Surface<Handle = H> + ?Sized,
    {
        surface.destroy(self.handle);
    }

    #[inline]
    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    #[inline]
    pub(crate) fn state_mut(&mut self) -> &mut ParticleState {
        &mut self.state
    }

    #[inline]
    pub fn handle(&self) -> &H {
        &self.handle
    }
}

/// Pull `v` back toward `[-limit, limit]` by `step`.
#[inline]
fn soft_limit(v: f32, limit: f32, step: f32) -> f32 {
    if v > limit {
        v - step
    } else if v < -limit {
        v + step
    } else {
        v
    }
}

/// Map `coord` into `[0, extent)`. A non-positive extent leaves it alone.
#[inline]
pub(crate) fn wrap(coord: f32, extent: f32) -> f32 {
    if extent <= 0.0 || (0.0..extent).contains(&coord) {
        return coord;
    }
    let wrapped = coord.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Uniform in `[0, extent)`, or `0` for an empty extent.
pub(crate) fn sample_coord<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen::<f32>() * extent
    } else {
        0.0
    }
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, half_range: f32) -> f32 {
    (rng.gen::<f32>() * 2.0 - 1.0) * half_range
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}
