//! Render pipeline
//!
//! A render walks a fixed sequence of stages:
//!
//! ```text
//! Configured -> Loaded -> Measured -> Composited -> Encoded
//! ```
//!
//! Any failure aborts the render; nothing partial is returned. The decoded
//! surface is owned by the render call and dropped once encoding is done.

use std::path::Path;
use std::time::Instant;

use bytes::Bytes;
use image::DynamicImage;
use tracing::{debug, info, info_span};

use super::canvas::{Canvas, RasterCanvas};
use super::compositor::{draw_label, LabelStyle};
use super::encoder::{encode_image, OutputFormat};
use super::metrics::{RenderMetrics, RenderStage};
use super::position::{compute_geometry, LabelGeometry};
use super::sink::OutputSink;
use crate::config::LabelConfig;
use crate::error::LabelError;

/// Outcome of a successful render.
#[derive(Debug, Clone)]
pub struct RenderResult {
    bytes: Bytes,
    path: Option<std::path::PathBuf>,
    format: OutputFormat,
    geometry: LabelGeometry,
    metrics: RenderMetrics,
}

impl RenderResult {
    /// Encoded image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Cheap clone of the encoded bytes.
    pub fn to_bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    /// Path written by a file sink, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Where the label ended up and at which font size.
    pub fn geometry(&self) -> &LabelGeometry {
        &self.geometry
    }

    pub fn metrics(&self) -> &RenderMetrics {
        &self.metrics
    }
}

/// Renders one [`LabelConfig`] to an [`OutputSink`].
#[derive(Debug, Clone)]
pub struct Labeler {
    config: LabelConfig,
    sink: OutputSink,
}

impl Labeler {
    pub fn new(config: LabelConfig) -> Self {
        Self {
            config,
            sink: OutputSink::default(),
        }
    }

    /// Write the encoded image through `sink` as well as returning it.
    pub fn with_sink(mut self, sink: OutputSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Load the configured source, then label and encode it.
    pub fn render(&self) -> Result<RenderResult, LabelError> {
        let span = info_span!("render", format = %self.config.format, source = ?self.config.source);
        let _guard = span.enter();

        let started = Instant::now();
        let encoded = self.config.source.read(&self.config.limits)?;
        let image = super::source::decode_image(&encoded, &self.config.limits)?;
        debug!(stage = "loaded", width = image.width(), height = image.height());

        let mut metrics = RenderMetrics {
            source_size: encoded.len(),
            ..RenderMetrics::default()
        };
        metrics.record(RenderStage::Load, started.elapsed());
        drop(encoded);

        self.finish(image, metrics)
    }

    /// Label an already decoded image.
    pub fn render_image(&self, image: DynamicImage) -> Result<RenderResult, LabelError> {
        let span = info_span!("render", format = %self.config.format, source = "decoded");
        let _guard = span.enter();

        self.finish(image, RenderMetrics::default())
    }

    fn finish(&self, image: DynamicImage, mut metrics: RenderMetrics) -> Result<RenderResult, LabelError> {
        let config = &self.config;
        let mut canvas = RasterCanvas::from_dynamic(image);
        let dimensions = canvas.dimensions();

        let started = Instant::now();
        let geometry = compute_geometry(&config.text, config.font_size, &config.placement, &dimensions);
        metrics.record(RenderStage::Measure, started.elapsed());
        metrics.font_shrunk = geometry.font_size != config.font_size;
        debug!(
            stage = "measured",
            x = geometry.anchor.x,
            y = geometry.anchor.y,
            width = geometry.width,
            height = geometry.height,
            font_size = geometry.font_size.get(),
            shrunk = metrics.font_shrunk,
        );

        let started = Instant::now();
        let style = LabelStyle {
            text: &config.text,
            font_color: config.font_color,
            halo_color: config.background_color,
            box_style: config.box_style,
        };
        draw_label(&mut canvas, &geometry, &style);
        metrics.record(RenderStage::Composite, started.elapsed());
        debug!(stage = "composited");

        let started = Instant::now();
        let surface = canvas.into_image();
        let encoded = encode_image(&surface, config.format, config.quality);
        drop(surface);
        debug!(stage = "surface released");
        let encoded = encoded?;
        metrics.record(RenderStage::Encode, started.elapsed());
        debug!(stage = "encoded", bytes = encoded.data.len());

        let path = self.sink.write(&encoded)?;

        metrics.output_size = encoded.data.len();
        metrics.dimensions = (dimensions.width, dimensions.height);
        metrics.output_format = encoded.format;

        info!(
            format = %encoded.format,
            width = dimensions.width,
            height = dimensions.height,
            output_size = metrics.output_size,
            font_size = geometry.font_size.get(),
            elapsed_ms = metrics.total_time().as_millis() as u64,
            "label rendered"
        );

        Ok(RenderResult {
            bytes: Bytes::from(encoded.data),
            path,
            format: encoded.format,
            geometry,
            metrics,
        })
    }
}

/// Render `config` into memory.
pub fn render(config: &LabelConfig) -> Result<RenderResult, LabelError> {
    Labeler::new(config.clone()).render()
}

/// Label an already decoded image into memory.
pub fn render_image(config: &LabelConfig, image: DynamicImage) -> Result<RenderResult, LabelError> {
    Labeler::new(config.clone()).render_image(image)
}
