//! Scroll-linked fade for page content.
//!
//! A block's opacity is the fraction of its height currently inside the
//! viewport: fully visible blocks are opaque, blocks scrolled out are
//! transparent, and partially visible ones fade proportionally.

/// A vertical span in page coordinates (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f32,
    pub height: f32,
}

impl Span {
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Fraction of `block` inside `viewport`, in `0.0..=1.0`.
///
/// Zero-height (or negative-height) blocks count as invisible.
pub fn visible_fraction(block: Span, viewport: Span) -> f32 {
    if block.height.is_nan() || block.height <= 0.0 {
        return 0.0;
    }
    let visible_top = block.top.max(viewport.top);
    let visible_bottom = block.bottom().min(viewport.bottom());
    let visible = (visible_bottom - visible_top).max(0.0);
    (visible / block.height).min(1.0)
}

/// Opacities for a set of blocks at the current scroll position.
pub fn fade_opacities(blocks: &[Span], viewport: Span) -> impl Iterator<Item = f32> + '_ {
    blocks
        .iter()
        .map(move |block| visible_fraction(*block, viewport))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Span = Span::new(1000.0, 800.0);

    #[test]
    fn test_fully_visible() {
        assert_eq!(visible_fraction(Span::new(1100.0, 200.0), VIEWPORT), 1.0);
    }

    #[test]
    fn test_fully_hidden() {
        assert_eq!(visible_fraction(Span::new(0.0, 500.0), VIEWPORT), 0.0);
        assert_eq!(visible_fraction(Span::new(2000.0, 500.0), VIEWPORT), 0.0);
    }

    #[test]
    fn test_partially_visible() {
        // Bottom half hangs below the viewport.
        assert_eq!(visible_fraction(Span::new(1600.0, 400.0), VIEWPORT), 0.5);
        // Top quarter scrolled past.
        assert_eq!(visible_fraction(Span::new(900.0, 400.0), VIEWPORT), 0.75);
    }

    #[test]
    fn test_taller_than_viewport() {
        assert_eq!(visible_fraction(Span::new(600.0, 1600.0), VIEWPORT), 0.5);
    }

    #[test]
    fn test_degenerate_block() {
        assert_eq!(visible_fraction(Span::new(1100.0, 0.0), VIEWPORT), 0.0);
        assert_eq!(visible_fraction(Span::new(1100.0, f32::NAN), VIEWPORT), 0.0);
    }

    #[test]
    fn test_fade_opacities() {
        let blocks = [Span::new(1100.0, 100.0), Span::new(3000.0, 100.0)];
        let opacities: Vec<f32> = fade_opacities(&blocks, VIEWPORT).collect();
        assert_eq!(opacities, vec![1.0, 0.0]);
    }
}
