//! Label rendering
//!
//! Overlays a text label (with a readability halo and an optional box) onto a
//! raster image and re-encodes it.
//!
//! ## Pipeline
//!
//! 1. **Load** - read and decode the source image ([`source`])
//! 2. **Measure** - shrink the font if needed and place the label ([`position`])
//! 3. **Composite** - draw box, halo and text onto a [`Canvas`] ([`compositor`])
//! 4. **Encode** - write PNG, GIF or JPEG ([`encoder`]) and hand the bytes to an
//!    [`OutputSink`]
//!
//! ## Example
//!
//! ```no_run
//! use image_labeler::config::LabelConfig;
//! use image_labeler::label::{render, Position};
//!
//! let config = LabelConfig::builder()
//!     .text("draft")
//!     .position(Position::TopRight)
//!     .file_path("photo.jpg")
//!     .build()?;
//! let result = render(&config)?;
//! std::fs::write("labeled.png", result.bytes())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod canvas;
pub mod color;
pub mod compositor;
pub mod encoder;
pub mod font;
pub mod labeler;
pub mod metrics;
pub mod position;
pub mod response;
pub mod sink;
pub mod source;

pub use canvas::{Canvas, RasterCanvas};
pub use color::{parse_hex_color, Color};
pub use compositor::{draw_label, BoxStyle, LabelStyle, HALO_OFFSETS};
pub use encoder::{encode_image, png_compression_level, EncodedImage, EncoderSettings, OutputFormat};
pub use font::{measure_text, FontSize, GlyphMetrics};
pub use labeler::{render, render_image, Labeler, RenderResult};
pub use metrics::{RenderMetrics, RenderStage};
pub use position::{
    compute_geometry, Anchor, BoxBounds, ImageDimensions, LabelGeometry, Placement, Position,
};
pub use response::error_response;
pub use sink::OutputSink;
pub use source::{SourceImage, SourceLimits};
