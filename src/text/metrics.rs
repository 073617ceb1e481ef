//! Character-count text metrics.
//!
//! Layout decisions never measure real glyphs. Width is estimated from the character count so
//! that wrapping is deterministic and independent of which fonts happen to be installed.

/// Average glyph advance as a fraction of the font size.
pub const CHAR_WIDTH_FACTOR: f64 = 0.55;

/// Estimated rendered width of `text` at `font_size`.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    (text.chars().count() as f64) * font_size * CHAR_WIDTH_FACTOR
}

/// How many characters fit on one line of `width` pixels, after removing `side_padding` from
/// both sides. Never less than one.
pub fn chars_per_line(width: f64, font_size: f64, side_padding: f64) -> usize {
    let advance = font_size * CHAR_WIDTH_FACTOR;
    if !advance.is_finite() || advance <= 0.0 {
        return 1;
    }
    let usable = width - 2.0 * side_padding;
    if !usable.is_finite() || usable <= 0.0 {
        return 1;
    }
    ((usable / advance).floor() as usize).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/text/metrics.rs"]
mod tests;
