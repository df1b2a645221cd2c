use serde::{Deserialize, Serialize};

/// Average glyph advance as a fraction of the font size.
pub const CHAR_WIDTH_FACTOR: f64 = 0.6;

/// Approximate rectangular extent of a rendered single-line label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextFootprint {
    pub width: f64,
    pub height: f64,
}

impl TextFootprint {
    /// Longer of the two sides; the diameter a label needs to clear.
    pub fn extent(&self) -> f64 {
        self.width.max(self.height)
    }
}

/// Coarse footprint from character count, not glyph metrics.
pub fn estimate_footprint(text: &str, font_size: u32) -> TextFootprint {
    let size = font_size as f64;
    TextFootprint {
        width: text.chars().count() as f64 * size * CHAR_WIDTH_FACTOR,
        height: size,
    }
}
