//! The particle population and its event handlers.
//!
//! A [`ParticleSystem`] owns a fixed-size population, the surface it draws
//! on, and the field bounds particles wrap within. Hosts drive it with four
//! calls:
//!
//! - [`tick`](ParticleSystem::tick) once per display frame
//! - [`on_pointer_move`](ParticleSystem::on_pointer_move) per pointer event
//! - [`on_resize`](ParticleSystem::on_resize) per viewport change
//! - [`shutdown`](ParticleSystem::shutdown) at teardown (dropping does the same)
//!
//! ```ignore
//! let mut system = ParticleSystem::new(ParticleConfig::default(), Vec2::new(1280.0, 720.0), SpriteStore::new());
//! system.on_pointer_move(Vec2::new(12.0, -3.0));
//! system.tick();
//! ```

use crate::config::ParticleConfig;
use crate::particle::{sample_coord, Particle, ParticleState};
use crate::surface::Surface;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// What a call to [`ParticleSystem::on_resize`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// The change was large; the whole population was recreated.
    Regenerated,
    /// The change was small; `moved` coordinates were resampled into the new bounds.
    Repositioned { moved: usize },
}

/// A population of particles bound to a [`Surface`].
pub struct ParticleSystem<S: Surface, R = SmallRng> {
    config: ParticleConfig,
    bounds: Vec2,
    particles: Vec<Particle<S::Handle>>,
    surface: S,
    rng: R,
    ticks: u64,
}

impl<S: Surface> ParticleSystem<S, SmallRng> {
    /// Create and spawn a population seeded from OS entropy.
    pub fn new(config: ParticleConfig, bounds: Vec2, surface: S) -> Self {
        Self::with_rng(config, bounds, surface, SmallRng::from_entropy())
    }

    /// Create and spawn a reproducible population.
    pub fn seeded(config: ParticleConfig, bounds: Vec2, surface: S, seed: u64) -> Self {
        Self::with_rng(config, bounds, surface, SmallRng::seed_from_u64(seed))
    }
}

impl<S: Surface, R: Rng> ParticleSystem<S, R> {
    /// Create and spawn a population using the given RNG.
    pub fn with_rng(config: ParticleConfig, bounds: Vec2, surface: S, rng: R) -> Self {
        let mut system = Self {
            particles: Vec::with_capacity(config.particle_count as usize),
            config,
            bounds,
            surface,
            rng,
            ticks: 0,
        };
        system.populate();
        tracing::info!(
            count = system.particles.len(),
            width = bounds.x,
            height = bounds.y,
            "particle field created"
        );
        system
    }

    /// Advance every particle by one step, in population order.
    pub fn tick(&mut self) {
        for particle in &mut self.particles {
            particle.advance(&self.config, self.bounds, &mut self.surface);
        }
        self.ticks += 1;
    }

    /// Run ticks in an explicit loop.
    ///
    /// `next_frame` is called before every tick and should block until the
    /// host's next frame, returning `false` once the host is going away.
    pub fn run<F>(&mut self, mut next_frame: F)
    where
        F: FnMut(&mut Self) -> bool,
    {
        while next_frame(self) {
            self.tick();
        }
    }

    /// Kick every particle by `delta * speed_gain`.
    ///
    /// `delta` is the pointer movement in pixels since the previous event.
    pub fn on_pointer_move(&mut self, delta: Vec2) {
        let impulse = delta * self.config.speed_gain;
        for particle in &mut self.particles {
            particle.state_mut().push(impulse);
        }
    }

    /// React to new field bounds.
    ///
    /// If either axis changed by more than `resize_threshold` of its previous
    /// length, the population is destroyed and respawned. Otherwise only
    /// coordinates past the new bounds are resampled; everything else about
    /// each particle is kept. The recorded bounds are updated either way.
    pub fn on_resize(&mut self, new_bounds: Vec2) -> ResizeOutcome {
        let dx = relative_change(self.bounds.x, new_bounds.x);
        let dy = relative_change(self.bounds.y, new_bounds.y);
        let threshold = self.config.resize_threshold;

        let outcome = if dx > threshold || dy > threshold {
            self.clear();
            self.bounds = new_bounds;
            self.populate();
            ResizeOutcome::Regenerated
        } else {
            let mut moved = 0;
            for particle in &mut self.particles {
                let state = particle.state_mut();
                if state.position.x >= new_bounds.x {
                    state.position.x = sample_coord(&mut self.rng, new_bounds.x);
                    moved += 1;
                }
                if state.position.y >= new_bounds.y {
                    state.position.y = sample_coord(&mut self.rng, new_bounds.y);
                    moved += 1;
                }
            }
            ResizeOutcome::Repositioned { moved }
        };

        tracing::debug!(
            from = ?self.bounds,
            to = ?new_bounds,
            dx,
            dy,
            ?outcome,
            "field resized"
        );
        self.bounds = new_bounds;
        outcome
    }

    /// Release every surface handle and drop the system.
    pub fn shutdown(mut self) {
        self.clear();
        tracing::info!(ticks = self.ticks, "particle field shut down");
    }

    #[inline]
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    #[inline]
    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    #[inline]
    pub fn particles(&self) -> &[Particle<S::Handle>] {
        &self.particles
    }

    /// Simulation state of every particle, in population order.
    pub fn states(&self) -> impl Iterator<Item = &ParticleState> {
        self.particles.iter().map(Particle::state)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Ticks run since creation.
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn populate(&mut self) {
        for _ in 0..self.config.particle_count {
            let state = ParticleState::random(&mut self.rng, self.bounds, &self.config);
            self.particles.push(Particle::spawn(&mut self.surface, state));
        }
    }
}

impl<S: Surface, R> ParticleSystem<S, R> {
    fn clear(&mut self) {
        for particle in self.particles.drain(..) {
            particle.destroy(&mut self.surface);
        }
    }
}

impl<S: Surface, R> Drop for ParticleSystem<S, R> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// `|new - old| / old`, with a non-positive `old` counting as an unbounded change.
fn relative_change(old: f32, new: f32) -> f32 {
    if old > 0.0 {
        ((new - old) / old).abs()
    } else {
        f32::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SpriteStore;

    fn system(count: u32) -> ParticleSystem<SpriteStore> {
        let config = ParticleConfig::default().with_particle_count(count);
        ParticleSystem::seeded(config, Vec2::new(1000.0, 800.0), SpriteStore::new(), 9)
    }

    #[test]
    fn test_relative_change() {
        assert_eq!(relative_change(1000.0, 1300.0), 0.3);
        assert!((relative_change(1000.0, 500.0) - 0.5).abs() < 1e-6);
        assert_eq!(relative_change(0.0, 10.0), f32::INFINITY);
        assert_eq!(relative_change(0.0, 0.0), f32::INFINITY);
    }

    #[test]
    fn test_init_spawns_handles() {
        let sys = system(25);
        assert_eq!(sys.len(), 25);
        assert_eq!(sys.surface().len(), 25);
    }

    #[test]
    fn test_tick_pushes_state_to_surface() {
        let mut sys = system(3);
        sys.tick();
        assert_eq!(sys.tick_count(), 1);
        for particle in sys.particles() {
            let drawn = sys.surface().get(particle.handle()).unwrap();
            assert_eq!(drawn.position, particle.state().position.to_array());
            assert_eq!(drawn.size, particle.state().size);
            assert_eq!(drawn.opacity, particle.state().opacity);
        }
    }

    #[test]
    fn test_regenerate_reuses_surface_slots() {
        let mut sys = system(10);
        let outcome = sys.on_resize(Vec2::new(200.0, 800.0));
        assert_eq!(outcome, ResizeOutcome::Regenerated);
        assert_eq!(sys.surface().len(), 10);
        assert_eq!(sys.surface().capacity(), 10);
    }

    #[test]
    fn test_zero_previous_bounds_regenerates() {
        let config = ParticleConfig::default().with_particle_count(4);
        let mut sys = ParticleSystem::seeded(config, Vec2::ZERO, SpriteStore::new(), 1);
        assert_eq!(sys.on_resize(Vec2::new(10.0, 10.0)), ResizeOutcome::Regenerated);
        assert_eq!(sys.bounds(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_run_loop_stops_when_host_says_so() {
        let mut sys = system(2);
        let mut frames = 0;
        sys.run(|_| {
            frames += 1;
            frames <= 5
        });
        assert_eq!(sys.tick_count(), 5);
    }
}
