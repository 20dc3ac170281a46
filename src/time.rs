//! Frame timing.
//!
//! The particle simulation is tick-based and ignores wall time, but the host
//! still wants a frame clock: the headline effect runs on a fixed period and
//! the window title shows the frame rate.
//!
//! # Example
//!
//! ```ignore
//! use driftfield::time::{Interval, Time};
//!
//! let mut time = Time::new();
//! let mut every_half_second = Interval::new(0.5);
//!
//! // In your frame callback:
//! let dt = time.update();
//! if every_half_second.tick(dt) {
//!     // ...
//! }
//! ```

use std::time::{Duration, Instant};

/// Frame clock: elapsed time, delta time, frame count and FPS.
#[derive(Debug)]
pub struct Time {
    /// When the clock was created or last reset.
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl Time {
    /// Create a new clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Mark a new frame. Call once per frame; returns the delta in seconds.
    pub fn update(&mut self) -> f32 {
        self.update_at(Instant::now())
    }

    fn update_at(&mut self, now: Instant) -> f32 {
        self.delta_secs = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_secs = now.saturating_duration_since(self.start).as_secs_f32();
        self.frame_count += 1;

        let fps_elapsed = now.saturating_duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Total elapsed time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since the previous frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Reset the clock to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

/// Fires once per fixed period of accumulated time.
///
/// Leftover time carries into the next period, so the average rate stays
/// exact even when frames don't line up with the period. At most one firing
/// is reported per [`tick`](Self::tick); a long stall doesn't cause a burst.
#[derive(Debug, Clone)]
pub struct Interval {
    period: f32,
    accumulated: f32,
}

impl Interval {
    /// Create an interval firing every `period` seconds.
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            accumulated: 0.0,
        }
    }

    #[inline]
    pub fn period(&self) -> f32 {
        self.period
    }

    /// Add `dt` seconds and report whether the period elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.accumulated += dt.max(0.0);
        if self.accumulated >= self.period {
            // Drop whole extra periods, keep the fraction.
            self.accumulated = (self.accumulated - self.period) % self.period;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.delta(), 0.0);
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        let later = time.start + Duration::from_millis(20);
        let delta = time.update_at(later);

        assert!((delta - 0.02).abs() < 1e-4);
        assert!((time.elapsed() - 0.02).abs() < 1e-4);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_fps() {
        let mut time = Time::new();
        let start = time.start;
        for i in 1..=30 {
            time.update_at(start + Duration::from_millis(i * 20));
        }
        // 25 frames landed in the first 500ms window
        assert!((time.fps() - 50.0).abs() < 1.0);
    }

    #[test]
    fn test_reset() {
        let mut time = Time::new();
        time.update_at(time.start + Duration::from_millis(5));
        time.reset();
        assert_eq!(time.frame(), 0);
    }

    #[test]
    fn test_interval_fires_each_period() {
        let mut interval = Interval::new(0.5);
        assert!(!interval.tick(0.2));
        assert!(!interval.tick(0.2));
        assert!(interval.tick(0.2));
        // 0.1 carried over
        assert!(!interval.tick(0.3));
        assert!(interval.tick(0.1));
    }

    #[test]
    fn test_interval_no_burst_after_stall() {
        let mut interval = Interval::new(0.5);
        assert!(interval.tick(3.2));
        assert!(!interval.tick(0.0));
        assert!(interval.tick(0.3));
    }

    #[test]
    fn test_interval_ignores_negative_dt() {
        let mut interval = Interval::new(1.0);
        assert!(!interval.tick(-5.0));
        assert!(interval.tick(1.0));
    }
}
