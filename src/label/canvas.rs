//! Drawing surface abstraction.
//!
//! The compositor only talks to a [`Canvas`]; [`RasterCanvas`] is the
//! implementation backed by an in-memory RGBA buffer. Everything drawn is
//! clipped to the image bounds.

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use super::color::Color;
use super::font::{text_pixels, FontSize};
use super::position::{BoxBounds, ImageDimensions};

/// Primitive drawing operations used to composite a label.
#[cfg_attr(test, mockall::automock)]
pub trait Canvas {
    /// Size of the underlying image.
    fn dimensions(&self) -> ImageDimensions;

    /// Resolve an RGB color to the pixel value used on this surface.
    fn allocate_color(&mut self, color: Color) -> Rgba<u8>;

    /// Fill the inclusive rectangle.
    fn fill_rect(&mut self, bounds: BoxBounds, color: Rgba<u8>);

    /// Outline the inclusive rectangle with lines `thickness` pixels wide,
    /// centered on the rectangle edges.
    fn outline_rect(&mut self, bounds: BoxBounds, thickness: u32, color: Rgba<u8>);

    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, size: FontSize, x: i32, y: i32, text: &str, color: Rgba<u8>);
}

/// Truecolor canvas over an [`RgbaImage`].
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Take ownership of a decoded image, converting to RGBA8.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self::new(image.into_rgba8())
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn put_clipped(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Fill the part of `span` that lies inside the image.
    fn fill_clipped(&mut self, span: Span, color: Rgba<u8>) {
        let clipped = Span {
            left: span.left.max(0),
            top: span.top.max(0),
            right: span.right.min(self.image.width() as i64 - 1),
            bottom: span.bottom.min(self.image.height() as i64 - 1),
        };
        if clipped.is_empty() {
            return;
        }
        // clipped coordinates fit the image, so the casts are lossless
        let rect = Rect::at(clipped.left as i32, clipped.top as i32)
            .of_size(clipped.width() as u32, clipped.height() as u32);
        draw_filled_rect_mut(&mut self.image, rect, color);
    }
}

impl std::fmt::Debug for RasterCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterCanvas")
            .field("dimensions", &(self.image.width(), self.image.height()))
            .finish()
    }
}

/// Inclusive rectangle in `i64` so insets and paddings cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl Span {
    fn from_bounds(bounds: BoxBounds) -> Self {
        Self {
            left: bounds.left as i64,
            top: bounds.top as i64,
            right: bounds.right as i64,
            bottom: bounds.bottom as i64,
        }
    }

    fn inset(&self, by: i64) -> Self {
        Self {
            left: self.left + by,
            top: self.top + by,
            right: self.right - by,
            bottom: self.bottom - by,
        }
    }

    fn width(&self) -> i64 {
        self.right - self.left + 1
    }

    fn height(&self) -> i64 {
        self.bottom - self.top + 1
    }

    fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

impl Canvas for RasterCanvas {
    fn dimensions(&self) -> ImageDimensions {
        ImageDimensions {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    fn allocate_color(&mut self, color: Color) -> Rgba<u8> {
        Rgba([color.r, color.g, color.b, 255])
    }

    fn fill_rect(&mut self, bounds: BoxBounds, color: Rgba<u8>) {
        self.fill_clipped(Span::from_bounds(bounds), color);
    }

    fn outline_rect(&mut self, bounds: BoxBounds, thickness: u32, color: Rgba<u8>) {
        if thickness == 0 {
            return;
        }
        let thickness = thickness as i64;
        let half = thickness / 2;
        let outer = Span::from_bounds(bounds).inset(-half);
        if outer.is_empty() {
            return;
        }

        // innermost one-pixel ring; everything from it out to `outer` is border
        let inner = Span::from_bounds(bounds).inset(thickness - 1 - half);
        if inner.width() < 3 || inner.height() < 3 {
            self.fill_clipped(outer, color);
            return;
        }

        let bands = [
            Span {
                bottom: inner.top,
                ..outer
            },
            Span {
                top: inner.bottom,
                ..outer
            },
            Span {
                top: inner.top + 1,
                bottom: inner.bottom - 1,
                right: inner.left,
                ..outer
            },
            Span {
                top: inner.top + 1,
                bottom: inner.bottom - 1,
                left: inner.right,
                ..outer
            },
        ];
        for band in bands {
            self.fill_clipped(band, color);
        }
    }

    fn draw_text(&mut self, size: FontSize, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        for (px, py) in text_pixels(text, size, x, y) {
            self.put_clipped(px, py, color);
        }
    }
}
