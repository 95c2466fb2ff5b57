//! Label compositor.
//!
//! Paints a label onto a [`Canvas`] in three layers, back to front:
//!
//! 1. the optional box (filled background, then border), only when the
//!    border thickness is non-zero
//! 2. the halo: the text repainted in the background color at seven
//!    one-pixel offsets around the anchor
//! 3. the text itself in the font color

use tracing::trace;

use super::canvas::Canvas;
use super::color::Color;
use super::position::LabelGeometry;

/// Offsets at which the halo copies of the text are drawn, in paint order.
pub const HALO_OFFSETS: [(i32, i32); 7] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
];

/// Decorative box drawn behind the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxStyle {
    pub padding: i32,
    pub border_thickness: u32,
    pub border_color: Color,
    pub background_color: Color,
}

impl BoxStyle {
    /// The box is only drawn when it has a border.
    pub fn is_enabled(&self) -> bool {
        self.border_thickness > 0
    }
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            padding: 2,
            border_thickness: 0,
            border_color: Color::white(),
            background_color: Color::white(),
        }
    }
}

/// Everything the compositor needs besides the geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelStyle<'a> {
    pub text: &'a str,
    pub font_color: Color,
    pub halo_color: Color,
    pub box_style: BoxStyle,
}

/// Draw the box, halo and text for one label.
pub fn draw_label<C: Canvas + ?Sized>(canvas: &mut C, geometry: &LabelGeometry, style: &LabelStyle<'_>) {
    draw_box(canvas, geometry, &style.box_style);

    let halo = canvas.allocate_color(style.halo_color);
    let font = canvas.allocate_color(style.font_color);
    let x = geometry.anchor.x;
    let y = geometry.anchor.y;

    for (dx, dy) in HALO_OFFSETS {
        canvas.draw_text(
            geometry.font_size,
            x.saturating_add(dx),
            y.saturating_add(dy),
            style.text,
            halo,
        );
    }

    canvas.draw_text(geometry.font_size, x, y, style.text, font);

    trace!(x, y, font_size = geometry.font_size.get(), "label painted");
}

/// Draw the box behind the label, if enabled.
///
/// Returns whether anything was drawn.
pub fn draw_box<C: Canvas + ?Sized>(canvas: &mut C, geometry: &LabelGeometry, box_style: &BoxStyle) -> bool {
    if !box_style.is_enabled() {
        return false;
    }

    let border = canvas.allocate_color(box_style.border_color);
    let background = canvas.allocate_color(box_style.background_color);
    let bounds = geometry.box_bounds(box_style.padding);

    canvas.fill_rect(bounds, background);
    canvas.outline_rect(bounds, box_style.border_thickness, border);

    trace!(?bounds, thickness = box_style.border_thickness, "label box painted");
    true
}
