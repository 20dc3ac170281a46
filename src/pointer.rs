//! Pointer movement tracking.
//!
//! Windowing systems report absolute cursor positions; particles want the
//! movement between two events. [`PointerTracker`] remembers the previous
//! position and turns each new one into a delta.

use glam::Vec2;
use winit::event::WindowEvent;

/// Turns absolute cursor positions into movement deltas.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    last_position: Option<Vec2>,
    scale_factor: f64,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            last_position: None,
            scale_factor: 1.0,
        }
    }

    /// Set the physical-to-logical pixel ratio used for winit events.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    /// Record a cursor position and return the movement since the previous one.
    ///
    /// The first position after construction or [`reset`](Self::reset) has no
    /// predecessor and yields `None`.
    pub fn moved_to(&mut self, position: Vec2) -> Option<Vec2> {
        let delta = self.last_position.map(|last| position - last);
        self.last_position = Some(position);
        delta
    }

    /// Forget the previous position, e.g. when the cursor leaves the window.
    pub fn reset(&mut self) {
        self.last_position = None;
    }

    /// Process a winit window event, returning a logical-pixel delta for
    /// cursor moves.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<Vec2> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(self.scale_factor);
                self.moved_to(Vec2::new(logical.x as f32, logical.y as f32))
            }
            WindowEvent::CursorLeft { .. } => {
                self.reset();
                None
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor);
                self.reset();
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_has_no_delta() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.moved_to(Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_deltas_between_moves() {
        let mut tracker = PointerTracker::new();
        tracker.moved_to(Vec2::new(10.0, 10.0));
        assert_eq!(tracker.moved_to(Vec2::new(15.0, 7.0)), Some(Vec2::new(5.0, -3.0)));
        assert_eq!(tracker.moved_to(Vec2::new(15.0, 7.0)), Some(Vec2::ZERO));
    }

    #[test]
    fn test_reset_prevents_jump_on_reentry() {
        let mut tracker = PointerTracker::new();
        tracker.moved_to(Vec2::new(0.0, 0.0));
        tracker.reset();
        assert_eq!(tracker.moved_to(Vec2::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_ignores_non_positive_scale() {
        let mut tracker = PointerTracker::new();
        tracker.set_scale_factor(0.0);
        assert_eq!(tracker.scale_factor, 1.0);
        tracker.set_scale_factor(2.0);
        assert_eq!(tracker.scale_factor, 2.0);
    }
}
