//! Tunable constants for the particle field.
//!
//! Every knob the simulation reads lives on [`ParticleConfig`]. The defaults
//! reproduce the classic backdrop look; override them with the `with_*`
//! setters or load a JSON document:
//!
//! ```ignore
//! use driftfield::ParticleConfig;
//!
//! let config = ParticleConfig::default()
//!     .with_particle_count(250)
//!     .with_gravity_gain(0.0)
//!     .with_resize_threshold(0.5);
//! config.validate()?;
//! ```
//!
//! A JSON document only needs the fields it changes:
//!
//! ```json
//! { "particle_count": 40, "fade_speed": 0.01 }
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a freshly created particle picks its starting opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialOpacity {
    /// Start fully opaque.
    Full,
    /// Start at a uniform random opacity in `[0, 1)`.
    #[default]
    Random,
}

/// Simulation constants for a [`ParticleSystem`](crate::ParticleSystem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Number of particles in the population.
    pub particle_count: u32,
    /// Pointer movement (pixels) to velocity conversion factor.
    pub speed_gain: f32,
    /// Downward acceleration added to `vy` every tick.
    pub gravity_gain: f32,
    /// Opacity change per tick.
    pub fade_speed: f32,
    /// Soft limit on `|vx|` and `|vy|`.
    pub max_speed: f32,
    /// Per-tick correction applied while outside `max_speed`.
    pub speed_limit_gain: f32,
    /// Soft limit on downward `vy`, smaller than `max_speed`.
    pub gravity_speed_limit: f32,
    /// Per-tick correction applied while `vy` exceeds `gravity_speed_limit`.
    pub gravity_limit_gain: f32,
    /// Size change per tick.
    pub size_gain: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Opacity floor where fading turns around.
    pub min_opacity: f32,
    /// Opacity ceiling where fading turns around.
    pub max_opacity: f32,
    /// Initial velocity components are uniform in `[-initial_speed, initial_speed)`.
    pub initial_speed: f32,
    pub initial_opacity: InitialOpacity,
    /// Relative change of either bound beyond which a resize regenerates the
    /// whole population instead of repositioning strays.
    pub resize_threshold: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            speed_gain: 0.004,
            gravity_gain: 0.003,
            fade_speed: 0.005,
            max_speed: 4.0,
            speed_limit_gain: 0.05,
            gravity_speed_limit: 1.1,
            gravity_limit_gain: 0.02,
            size_gain: 0.01,
            min_size: 2.0,
            max_size: 10.0,
            min_opacity: 0.1,
            max_opacity: 1.0,
            initial_speed: 1.5,
            initial_opacity: InitialOpacity::Random,
            resize_threshold: 0.3,
        }
    }
}

impl ParticleConfig {
    /// Create a config with the default constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the pointer impulse factor.
    pub fn with_speed_gain(mut self, gain: f32) -> Self {
        self.speed_gain = gain;
        self
    }

    /// Set the per-tick gravity acceleration. Use `0.0` to disable gravity.
    pub fn with_gravity_gain(mut self, gain: f32) -> Self {
        self.gravity_gain = gain;
        self
    }

    /// Set the opacity change per tick.
    pub fn with_fade_speed(mut self, speed: f32) -> Self {
        self.fade_speed = speed;
        self
    }

    /// Set the soft speed limit and its per-tick correction.
    pub fn with_speed_limit(mut self, max_speed: f32, correction: f32) -> Self {
        self.max_speed = max_speed;
        self.speed_limit_gain = correction;
        self
    }

    /// Set the soft falling-speed limit and its per-tick correction.
    pub fn with_gravity_speed_limit(mut self, limit: f32, correction: f32) -> Self {
        self.gravity_speed_limit = limit;
        self.gravity_limit_gain = correction;
        self
    }

    /// Set the size range particles breathe between.
    pub fn with_size_range(mut self, min: f32, max: f32) -> Self {
        self.min_size = min;
        self.max_size = max;
        self
    }

    /// Set the size change per tick.
    pub fn with_size_gain(mut self, gain: f32) -> Self {
        self.size_gain = gain;
        self
    }

    /// Set the opacity range particles fade between.
    pub fn with_opacity_range(mut self, min: f32, max: f32) -> Self {
        self.min_opacity = min;
        self.max_opacity = max;
        self
    }

    /// Set the half-range for initial velocity components.
    pub fn with_initial_speed(mut self, speed: f32) -> Self {
        self.initial_speed = speed;
        self
    }

    /// Choose how new particles pick their starting opacity.
    pub fn with_initial_opacity(mut self, mode: InitialOpacity) -> Self {
        self.initial_opacity = mode;
        self
    }

    /// Set the relative resize change that triggers regeneration.
    pub fn with_resize_threshold(mut self, threshold: f32) -> Self {
        self.resize_threshold = threshold;
        self
    }

    /// Check that ranges are ordered and every value is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            ("speed_gain", self.speed_gain),
            ("gravity_gain", self.gravity_gain),
            ("fade_speed", self.fade_speed),
            ("max_speed", self.max_speed),
            ("speed_limit_gain", self.speed_limit_gain),
            ("gravity_speed_limit", self.gravity_speed_limit),
            ("gravity_limit_gain", self.gravity_limit_gain),
            ("size_gain", self.size_gain),
            ("min_size", self.min_size),
            ("max_size", self.max_size),
            ("min_opacity", self.min_opacity),
            ("max_opacity", self.max_opacity),
            ("initial_speed", self.initial_speed),
            ("resize_threshold", self.resize_threshold),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
            }
            if value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        if self.min_size > self.max_size {
            return Err(ConfigError::Invalid(format!(
                "min_size ({}) exceeds max_size ({})",
                self.min_size, self.max_size
            )));
        }
        if self.min_opacity > self.max_opacity {
            return Err(ConfigError::Invalid(format!(
                "min_opacity ({}) exceeds max_opacity ({})",
                self.min_opacity, self.max_opacity
            )));
        }

        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ParticleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count, 100);
        assert_eq!(config.resize_threshold, 0.3);
        assert_eq!(config.initial_opacity, InitialOpacity::Random);
    }

    #[test]
    fn test_builder_chain() {
        let config = ParticleConfig::new()
            .with_particle_count(7)
            .with_gravity_gain(0.0)
            .with_size_range(1.0, 3.0)
            .with_initial_opacity(InitialOpacity::Full);

        assert_eq!(config.particle_count, 7);
        assert_eq!(config.gravity_gain, 0.0);
        assert_eq!(config.min_size, 1.0);
        assert_eq!(config.max_size, 3.0);
        assert_eq!(config.initial_opacity, InitialOpacity::Full);
    }

    #[test]
    fn test_inverted_size_range_rejected() {
        let config = ParticleConfig::new().with_size_range(5.0, 2.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_inverted_opacity_range_rejected() {
        let config = ParticleConfig::new().with_opacity_range(0.9, 0.2);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_non_finite_rejected() {
        let config = ParticleConfig::new().with_fade_speed(f32::NAN);
        assert!(config.validate().is_err());

        let config = ParticleConfig::new().with_resize_threshold(-0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            ParticleConfig::from_json_str(r#"{ "particle_count": 40, "initial_opacity": "full" }"#)
                .unwrap();
        assert_eq!(config.particle_count, 40);
        assert_eq!(config.initial_opacity, InitialOpacity::Full);
        assert_eq!(config.max_speed, 4.0);
    }

    #[test]
    fn test_malformed_json() {
        let result = ParticleConfig::from_json_str("{ particle_count: }");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_json_values() {
        let result = ParticleConfig::from_json_str(r#"{ "min_size": 12.0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ParticleConfig::load("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
