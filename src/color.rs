//! Particle colors.
//!
//! Each particle draws one color at birth from a soft, pastel-leaning HSV
//! range (any hue, low saturation, medium-to-full brightness) and keeps it
//! for its whole life.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels normalized to `0.0..=1.0`.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32) / 255.0
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A color in HSV space.
///
/// * `hue` - degrees, `0..360`
/// * `saturation` - percent, `0..=100`
/// * `value` - percent, `0..=100`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl Hsv {
    /// Sample the particle palette: whole-number hue in `0..360`,
    /// saturation in `0..=50` and value in `50..=100`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            hue: rng.gen_range(0..360) as f32,
            saturation: rng.gen_range(0..=50) as f32,
            value: rng.gen_range(50..=100) as f32,
        }
    }

    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(self.hue, self.saturation, self.value)
    }
}

/// Convert HSV (degrees, percent, percent) to 8-bit RGB.
///
/// Hues outside `0..360` fall through to a gray of the given value.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb {
    let s = saturation / 100.0;
    let v = value / 100.0;

    let sector = (hue / 60.0).floor();
    let f = hue / 60.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as i32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        5 => (v, p, q),
        _ => (v, v, v),
    };

    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}

fn to_channel(x: f32) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Draw a particle color.
pub fn random_particle_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Hsv::random(rng).to_rgb()
}
