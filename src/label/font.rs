//! Built-in bitmap font.
//!
//! Five fixed sizes are available, numbered 1 (smallest) to 5 (largest). Each
//! size has a fixed character cell; a label's width is the character count
//! times the cell width. Glyph shapes come from the 8x8 `font8x8` set and are
//! resampled nearest-neighbor into the cell of the requested size.

use font8x8::{UnicodeFonts, BASIC_FONTS};

use crate::error::LabelError;

/// Cell size (width, height) for font sizes 1 through 5.
const GLYPH_METRICS: [(u32, u32); 5] = [(5, 8), (6, 13), (7, 13), (8, 16), (9, 15)];

/// Side length of the source glyph bitmaps.
const SOURCE_CELL: u32 = 8;

/// Character drawn when the font has no glyph for the requested one.
const FALLBACK_CHAR: char = '?';

/// Bitmap font size in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontSize(u8);

impl FontSize {
    pub const MIN: FontSize = FontSize(1);
    pub const MAX: FontSize = FontSize(5);

    /// Create a font size, rejecting values outside `1..=5`.
    pub fn new(size: u8) -> Result<Self, LabelError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&size) {
            Ok(Self(size))
        } else {
            Err(LabelError::invalid_param(
                "fontSize",
                format!("must be between 1 and 5, got {}", size),
            ))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Next smaller size, or `None` at size 1.
    pub fn smaller(self) -> Option<Self> {
        (self.0 > Self::MIN.0).then(|| Self(self.0 - 1))
    }

    /// Character cell metrics for this size.
    pub fn metrics(self) -> GlyphMetrics {
        let (width, height) = GLYPH_METRICS[(self.0 - 1) as usize];
        GlyphMetrics { width, height }
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<i64> for FontSize {
    type Error = LabelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| {
                LabelError::invalid_param("fontSize", format!("must be between 1 and 5, got {}", value))
            })
            .and_then(Self::new)
    }
}

/// Fixed width and height of one character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub width: u32,
    pub height: u32,
}

impl GlyphMetrics {
    /// Pixel size of `text` set in this cell size.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let chars = text.chars().count() as u32;
        (chars.saturating_mul(self.width), self.height)
    }
}

/// Width and height in pixels of `text` at `size`.
pub fn measure_text(text: &str, size: FontSize) -> (u32, u32) {
    size.metrics().measure(text)
}

/// Rasterized glyph: set pixels as `(col, row)` offsets inside the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<(u32, u32)>,
}

/// Rasterize `c` into the cell of `size`.
pub fn glyph_mask(c: char, size: FontSize) -> GlyphMask {
    let metrics = size.metrics();
    let rows = BASIC_FONTS
        .get(c)
        .or_else(|| BASIC_FONTS.get(FALLBACK_CHAR))
        .unwrap_or([0; 8]);

    let mut pixels = Vec::new();
    for row in 0..metrics.height {
        let src_row = row * SOURCE_CELL / metrics.height;
        let bits = rows[src_row as usize];
        for col in 0..metrics.width {
            let src_col = col * SOURCE_CELL / metrics.width;
            if (bits >> src_col) & 1 == 1 {
                pixels.push((col, row));
            }
        }
    }

    GlyphMask {
        width: metrics.width,
        height: metrics.height,
        pixels,
    }
}

/// Absolute pixel coordinates covered by `text` drawn with its top-left
/// corner at `(x, y)`. Coordinates may fall outside any image.
pub fn text_pixels(text: &str, size: FontSize, x: i32, y: i32) -> Vec<(i32, i32)> {
    let metrics = size.metrics();
    let mut out = Vec::new();

    for (index, c) in text.chars().enumerate() {
        let cell_x = x as i64 + index as i64 * metrics.width as i64;
        let mask = glyph_mask(c, size);
        for (col, row) in mask.pixels {
            let px = cell_x + col as i64;
            let py = y as i64 + row as i64;
            if let (Ok(px), Ok(py)) = (i32::try_from(px), i32::try_from(py)) {
                out.push((px, py));
            }
        }
    }

    out
}
