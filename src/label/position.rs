//! Label geometry: font auto-shrink and anchor calculation.
//!
//! Given the label text, the preferred font size, the placement and the
//! image dimensions, this module works out the top-left anchor of the label
//! and its pixel size.
//!
//! # Example
//!
//! ```
//! use image_labeler::label::{compute_geometry, FontSize, ImageDimensions, Placement, Position};
//!
//! let image = ImageDimensions { width: 200, height: 100 };
//! let placement = Placement::anchored(Position::BottomRight, 5, 5);
//! let geometry = compute_geometry("Hello", FontSize::default(), &placement, &image);
//! // 200 - 5 * 7 - 5, 100 - 13 - 5
//! assert_eq!((geometry.anchor.x, geometry.anchor.y), (160, 82));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::font::{measure_text, FontSize};
use crate::error::LabelError;

/// Edge- or center-anchored label position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
    BottomCenter,
    TopRight,
    TopLeft,
    TopCenter,
    Center,
}

impl Position {
    /// All positions in legacy index order.
    pub const ALL: [Position; 7] = [
        Position::BottomRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::TopRight,
        Position::TopLeft,
        Position::TopCenter,
        Position::Center,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::TopRight => "top-right",
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::Center => "center",
        }
    }

    /// Look up a position by its numeric index (0 = bottom-right ... 6 = center).
    pub fn from_index(index: i64) -> Result<Self, LabelError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| LabelError::invalid_position(index.to_string()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "bottomright" | "br" => Ok(Position::BottomRight),
            "bottomleft" | "bl" => Ok(Position::BottomLeft),
            "bottomcenter" | "bc" => Ok(Position::BottomCenter),
            "topright" | "tr" => Ok(Position::TopRight),
            "topleft" | "tl" => Ok(Position::TopLeft),
            "topcenter" | "tc" => Ok(Position::TopCenter),
            "center" | "c" => Ok(Position::Center),
            _ => match s.trim().parse::<i64>() {
                Ok(index) => Self::from_index(index),
                Err(_) => Err(LabelError::invalid_position(s)),
            },
        }
    }
}

/// Where the label goes: fixed coordinates, or a position with edge margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Explicit { x: i32, y: i32 },
    Anchored {
        position: Position,
        offset_x: i32,
        offset_y: i32,
    },
}

impl Placement {
    pub fn explicit(x: i32, y: i32) -> Self {
        Placement::Explicit { x, y }
    }

    pub fn anchored(position: Position, offset_x: i32, offset_y: i32) -> Self {
        Placement::Anchored {
            position,
            offset_x,
            offset_y,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, Placement::Explicit { .. })
    }
}

impl Default for Placement {
    fn default() -> Self {
        Placement::anchored(Position::default(), 5, 5)
    }
}

/// Dimensions of the target image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Top-left pixel where the label begins. May be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Inclusive rectangle corners, as used by the box drawing calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoxBounds {
    pub fn width(&self) -> u32 {
        (self.right as i64 - self.left as i64 + 1).clamp(0, u32::MAX as i64) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom as i64 - self.top as i64 + 1).clamp(0, u32::MAX as i64) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Resolved label layout for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelGeometry {
    pub anchor: Anchor,
    pub width: u32,
    pub height: u32,
    /// Font size actually used, after auto-shrink.
    pub font_size: FontSize,
}

impl LabelGeometry {
    /// Bounds of the decorative box around the label.
    ///
    /// Corners saturate at the `i32` range.
    pub fn box_bounds(&self, padding: i32) -> BoxBounds {
        let x = self.anchor.x as i64;
        let y = self.anchor.y as i64;
        let padding = padding as i64;
        BoxBounds {
            left: saturate(x - padding),
            top: saturate(y - padding),
            right: saturate(x + self.width as i64 + padding),
            bottom: saturate(y + self.height as i64 + padding),
        }
    }
}

/// Shrink the font until the label plus the horizontal margin fits the image
/// width, stopping at size 1.
///
/// Explicit placements are never shrunk.
pub fn resolve_font_size(
    text: &str,
    preferred: FontSize,
    placement: &Placement,
    image: &ImageDimensions,
) -> FontSize {
    let offset_x = match placement {
        Placement::Explicit { .. } => return preferred,
        Placement::Anchored { offset_x, .. } => *offset_x as i64,
    };

    let mut size = preferred;
    loop {
        let (width, _) = measure_text(text, size);
        if width as i64 + offset_x <= image.width as i64 {
            return size;
        }
        match size.smaller() {
            Some(smaller) => size = smaller,
            None => return size,
        }
    }
}

/// Calculate the anchor for a label of the given size.
pub fn calculate_anchor(
    placement: &Placement,
    image: &ImageDimensions,
    label_width: u32,
    label_height: u32,
) -> Anchor {
    let (position, ox, oy) = match *placement {
        Placement::Explicit { x, y } => return Anchor::new(x, y),
        Placement::Anchored {
            position,
            offset_x,
            offset_y,
        } => (position, offset_x as i64, offset_y as i64),
    };

    let img_w = image.width as i64;
    let img_h = image.height as i64;
    let lw = label_width as i64;
    let lh = label_height as i64;

    let right = img_w - lw - ox;
    let bottom = img_h - lh - oy;
    let center_x = centered(image.width, label_width);
    let center_y = centered(image.height, label_height);

    let (x, y) = match position {
        Position::BottomRight => (right, bottom),
        Position::BottomLeft => (ox, bottom),
        Position::TopLeft => (ox, oy),
        Position::TopRight => (right, oy),
        Position::Center => (center_x, center_y),
        Position::TopCenter => (center_x, oy),
        Position::BottomCenter => (center_x, bottom),
    };

    Anchor::new(saturate(x), saturate(y))
}

/// `ceil(extent / 2 - size / 2)`
fn centered(extent: u32, size: u32) -> i64 {
    (extent as f64 / 2.0 - size as f64 / 2.0).ceil() as i64
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Full geometry pass: auto-shrink, measure, then place.
pub fn compute_geometry(
    text: &str,
    preferred: FontSize,
    placement: &Placement,
    image: &ImageDimensions,
) -> LabelGeometry {
    let font_size = resolve_font_size(text, preferred, placement, image);
    let (width, height) = measure_text(text, font_size);
    let anchor = calculate_anchor(placement, image, width, height);

    LabelGeometry {
        anchor,
        width,
        height,
        font_size,
    }
}
