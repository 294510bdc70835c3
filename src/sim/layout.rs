//! Text layout for spawn placement and explosion geometry
//!
//! The engine never renders, but it must know roughly how wide a word will
//! be on screen: long phrases wrap at word boundaries, tilted words sweep a
//! wider horizontal bound, and the spawn position has to keep the whole
//! thing inside the viewport. Real measurement lives with the collaborator
//! (canvas 2d on the web); [`ApproxMeasure`] is the deterministic fallback
//! used headless and in tests.

use rand::Rng;

use crate::consts::{AVG_CHAR_WIDTH, LINE_HEIGHT, MAX_LINE_WIDTH, SPAWN_PADDING, WRAP_FRACTION};

/// Current viewport dimensions, injected by the collaborator each call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Injected text-width measurement capability
pub trait TextMeasure {
    /// Rendered width in pixels of `text` at `font_size`
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Deterministic fallback: characters times an average-width constant
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMeasure;

impl TextMeasure for ApproxMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * AVG_CHAR_WIDTH
    }
}

/// Axis-aligned bounds of a word as it will appear on screen
#[derive(Debug, Clone, Copy)]
pub struct WordBounds {
    /// Widest display line
    pub width: f32,
    /// Total height across wrapped lines
    pub height: f32,
    /// Horizontal extent including the sweep of a tilted word
    pub max_width: f32,
}

/// True when text is long enough to wrap across display lines
pub fn needs_wrap(text: &str) -> bool {
    let len = text.chars().count();
    len > 15 || (text.contains(' ') && len > 12)
}

/// Maximum wrapped line width for the given viewport
pub fn wrap_width(viewport: Viewport) -> f32 {
    (viewport.width * WRAP_FRACTION).min(MAX_LINE_WIDTH)
}

/// Wrap text at word boundaries so no line measures wider than `max_width`.
///
/// A single word wider than `max_width` gets its own line rather than being
/// split mid-word.
pub fn wrap_text(
    measure: &dyn TextMeasure,
    text: &str,
    max_width: f32,
    font_size: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure.text_width(&candidate, font_size) > max_width && !current.is_empty() {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// The lines a word occupies on screen: wrapped for long phrases, otherwise
/// the text itself
pub fn display_lines(
    measure: &dyn TextMeasure,
    text: &str,
    font_size: f32,
    viewport: Viewport,
) -> Vec<String> {
    if needs_wrap(text) {
        wrap_text(measure, text, wrap_width(viewport), font_size)
    } else {
        vec![text.to_string()]
    }
}

/// Bounds of a word, accounting for wrapping and tilt
pub fn word_bounds(
    measure: &dyn TextMeasure,
    text: &str,
    font_size: f32,
    rotation_deg: f32,
    viewport: Viewport,
) -> WordBounds {
    let lines = display_lines(measure, text, font_size, viewport);
    let width = lines
        .iter()
        .map(|line| measure.text_width(line, font_size))
        .fold(0.0f32, f32::max);
    let height = lines.len() as f32 * font_size * LINE_HEIGHT;

    // A tilted word sweeps a wider horizontal extent than its text width
    let theta = rotation_deg.to_radians();
    let rotated = (width * theta.cos()).abs() + (height * theta.sin()).abs();

    WordBounds {
        width,
        height,
        max_width: width.max(rotated),
    }
}

/// Pick a spawn x that keeps `max_width` fully inside the viewport, with
/// edge padding. Content wider than the viewport is centered instead.
pub fn spawn_x(max_width: f32, viewport: Viewport, rng: &mut impl Rng) -> f32 {
    let max_x = viewport.width - max_width - SPAWN_PADDING;
    if max_x < SPAWN_PADDING {
        return (viewport.width - max_width) / 2.0;
    }
    rng.random::<f32>() * max_x + SPAWN_PADDING
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VP: Viewport = Viewport {
        width: 1280.0,
        height: 720.0,
    };

    #[test]
    fn test_approx_measure_scales_with_length_and_size() {
        let m = ApproxMeasure;
        assert_eq!(m.text_width("cat", 10.0), 3.0 * 10.0 * AVG_CHAR_WIDTH);
        assert!(m.text_width("longer", 10.0) > m.text_width("cat", 10.0));
        assert!(m.text_width("cat", 20.0) > m.text_width("cat", 10.0));
    }

    #[test]
    fn test_short_words_do_not_wrap() {
        assert!(!needs_wrap("cat"));
        assert!(!needs_wrap("basketball"));
        assert!(!needs_wrap("type fast")); // 9 chars, space but short
        let lines = display_lines(&ApproxMeasure, "basketball", 30.0, VP);
        assert_eq!(lines, vec!["basketball".to_string()]);
    }

    #[test]
    fn test_long_phrases_wrap() {
        assert!(needs_wrap("catch the word")); // 14 chars with spaces
        assert!(needs_wrap("uncharacteristically")); // 20 chars, no space
    }

    #[test]
    fn test_wrap_text_respects_max_width() {
        let m = ApproxMeasure;
        let font = 20.0;
        let lines = wrap_text(&m, "the quick brown fox jumps", 120.0, font);
        assert!(lines.len() > 1);
        for line in &lines {
            // Lines only overflow when a single word is itself too wide
            assert!(
                m.text_width(line, font) <= 120.0 || !line.contains(' '),
                "line {line:?} too wide"
            );
        }
        // No characters lost, spaces become line breaks
        assert_eq!(lines.join(" "), "the quick brown fox jumps");
    }

    #[test]
    fn test_oversized_single_word_keeps_own_line() {
        let lines = wrap_text(&ApproxMeasure, "electroencephalography", 50.0, 20.0);
        assert_eq!(lines, vec!["electroencephalography".to_string()]);
    }

    #[test]
    fn test_rotated_bounds_never_narrower_than_flat() {
        let flat = word_bounds(&ApproxMeasure, "rainbow", 40.0, 0.0, VP);
        let tilted = word_bounds(&ApproxMeasure, "rainbow", 40.0, 8.0, VP);
        assert!((flat.max_width - flat.width).abs() < 1e-3);
        assert!(tilted.max_width >= flat.width);
    }

    #[test]
    fn test_spawn_x_keeps_word_inside_viewport() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..100 {
            let x = spawn_x(300.0, VP, &mut rng);
            assert!(x >= SPAWN_PADDING);
            assert!(x + 300.0 <= VP.width);
        }
    }

    #[test]
    fn test_spawn_x_centers_oversized_content() {
        let mut rng = Pcg32::seed_from_u64(5);
        let x = spawn_x(2000.0, VP, &mut rng);
        assert!((x - (VP.width - 2000.0) / 2.0).abs() < 1e-3);
    }
}
