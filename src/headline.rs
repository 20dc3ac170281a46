//! Headline font cycling.
//!
//! Every character of a headline independently gets a random font family,
//! and the whole assignment is re-rolled on a fixed period (500 ms by
//! default). There is no state beyond the current assignment.

use crate::time::Interval;
use rand::Rng;

/// Font families the headline draws from.
pub const DEFAULT_FONTS: &[&str] = &[
    "Arial",
    "Verdana",
    "Courier New",
    "Times New Roman",
    "Georgia",
    "Tahoma",
    "Comic Sans MS",
    "Trebuchet MS",
    "Arial Black",
    "Impact",
    "Cormorant Garamond",
    "Playfair Display",
    "Montserrat",
    "Raleway",
    "Cinzel",
];

/// Seconds between re-rolls.
pub const DEFAULT_PERIOD: f32 = 0.5;

/// One character and the index of its font in [`HeadlineStyler::fonts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledGlyph {
    pub ch: char,
    pub font: usize,
}

/// Assigns random fonts to the characters of a headline on a timer.
#[derive(Debug, Clone)]
pub struct HeadlineStyler {
    fonts: Vec<String>,
    glyphs: Vec<StyledGlyph>,
    interval: Interval,
}

impl HeadlineStyler {
    /// Style `text` with [`DEFAULT_FONTS`], re-rolling every [`DEFAULT_PERIOD`].
    ///
    /// Until the first re-roll every character uses the first font.
    pub fn new(text: &str) -> Self {
        Self::with_fonts(text, DEFAULT_FONTS.iter().map(|f| f.to_string()).collect())
    }

    /// Style `text` with a custom font list. An empty list falls back to
    /// [`DEFAULT_FONTS`].
    pub fn with_fonts(text: &str, fonts: Vec<String>) -> Self {
        let fonts = if fonts.is_empty() {
            DEFAULT_FONTS.iter().map(|f| f.to_string()).collect()
        } else {
            fonts
        };
        Self {
            fonts,
            glyphs: text.chars().map(|ch| StyledGlyph { ch, font: 0 }).collect(),
            interval: Interval::new(DEFAULT_PERIOD),
        }
    }

    /// Change the re-roll period in seconds.
    pub fn with_period(mut self, period: f32) -> Self {
        self.interval = Interval::new(period);
        self
    }

    pub fn fonts(&self) -> &[String] {
        &self.fonts
    }

    pub fn glyphs(&self) -> &[StyledGlyph] {
        &self.glyphs
    }

    /// The headline text.
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }

    /// Pair each character with its font name.
    pub fn styled(&self) -> impl Iterator<Item = (char, &str)> {
        self.glyphs
            .iter()
            .map(|g| (g.ch, self.fonts[g.font].as_str()))
    }

    /// Give every character a fresh random font.
    pub fn restyle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let count = self.fonts.len();
        for glyph in &mut self.glyphs {
            glyph.font = rng.gen_range(0..count);
        }
        tracing::trace!(glyphs = self.glyphs.len(), "headline restyled");
    }

    /// Advance the timer by `dt` seconds, restyling when the period elapses.
    ///
    /// Returns `true` if the styling changed.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> bool {
        if self.interval.tick(dt) {
            self.restyle(rng);
            true
        } else {
            false
        }
    }

    /// Render as a run of `<span>` elements, one per character, each with an
    /// inline `font-family`.
    pub fn to_markup(&self) -> String {
        let mut out = String::with_capacity(self.glyphs.len() * 48);
        for (ch, font) in self.styled() {
            out.push_str("<span style=\"font-family: ");
            push_escaped(&mut out, font);
            out.push_str(";\">");
            push_escaped(&mut out, ch.encode_utf8(&mut [0; 4]));
            out.push_str("</span>");
        }
        out
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_one_glyph_per_char() {
        let styler = HeadlineStyler::new("héllo!");
        assert_eq!(styler.glyphs().len(), 6);
        assert_eq!(styler.text(), "héllo!");
    }

    #[test]
    fn test_restyle_uses_known_fonts() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut styler = HeadlineStyler::new("The quick brown fox");
        styler.restyle(&mut rng);

        for (_, font) in styler.styled() {
            assert!(DEFAULT_FONTS.contains(&font));
        }
        // 19 characters drawn from 15 fonts are almost surely not all the same.
        let first = styler.glyphs()[0].font;
        assert!(styler.glyphs().iter().any(|g| g.font != first));
    }

    #[test]
    fn test_update_on_period() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut styler = HeadlineStyler::new("abc");
        assert!(!styler.update(0.25, &mut rng));
        assert!(styler.update(0.25, &mut rng));
        assert!(!styler.update(0.1, &mut rng));
    }

    #[test]
    fn test_empty_font_list_falls_back() {
        let styler = HeadlineStyler::with_fonts("x", Vec::new());
        assert_eq!(styler.fonts().len(), DEFAULT_FONTS.len());
    }

    #[test]
    fn test_markup_escapes() {
        let styler = HeadlineStyler::with_fonts("<&", vec!["Mono".to_string()]);
        assert_eq!(
            styler.to_markup(),
            "<span style=\"font-family: Mono;\">&lt;</span><span style=\"font-family: Mono;\">&amp;</span>"
        );
    }
}
