// Validated label configuration and its builder

use std::path::PathBuf;

use crate::config::LabelOptions;
use crate::error::LabelError;
use crate::label::color::parse_hex_color;
use crate::label::{BoxStyle, Color, FontSize, OutputFormat, Placement, Position, SourceImage, SourceLimits};

/// Default horizontal and vertical distance from the image edge.
pub const DEFAULT_LABEL_OFFSET: i32 = 5;

/// Default target quality on the 1-100 scale.
pub const DEFAULT_QUALITY: u8 = 75;

/// Everything a render needs. Built once, never mutated by rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelConfig {
    pub text: String,
    pub placement: Placement,
    pub font_size: FontSize,
    pub font_color: Color,
    /// Halo color painted around the text
    pub background_color: Color,
    pub box_style: BoxStyle,
    pub format: OutputFormat,
    pub source: SourceImage,
    pub quality: u8,
    pub limits: SourceLimits,
}

impl LabelConfig {
    pub fn builder() -> LabelConfigBuilder {
        LabelConfigBuilder::default()
    }
}

/// Typed builder for [`LabelConfig`].
///
/// Values are checked in [`build`](Self::build); only
/// [`format_name`](Self::format_name) fails immediately.
#[derive(Debug, Clone)]
pub struct LabelConfigBuilder {
    text: String,
    position: Position,
    position_x: Option<i32>,
    position_y: Option<i32>,
    font_size: u8,
    font_color: Color,
    background_color: Color,
    format: OutputFormat,
    file_path: Option<PathBuf>,
    file_content: Option<Vec<u8>>,
    quality: u8,
    label_offset_x: i32,
    label_offset_y: i32,
    box_style: BoxStyle,
    limits: SourceLimits,
}

impl Default for LabelConfigBuilder {
    fn default() -> Self {
        Self {
            text: String::new(),
            position: Position::default(),
            position_x: None,
            position_y: None,
            font_size: FontSize::default().get(),
            font_color: Color::label_red(),
            background_color: Color::white(),
            format: OutputFormat::default(),
            file_path: None,
            file_content: None,
            quality: DEFAULT_QUALITY,
            label_offset_x: DEFAULT_LABEL_OFFSET,
            label_offset_y: DEFAULT_LABEL_OFFSET,
            box_style: BoxStyle::default(),
            limits: SourceLimits::default(),
        }
    }
}

impl LabelConfigBuilder {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Place the label at exact coordinates, overriding `position`.
    pub fn position_xy(mut self, x: i32, y: i32) -> Self {
        self.position_x = Some(x);
        self.position_y = Some(y);
        self
    }

    pub fn position_x(mut self, x: i32) -> Self {
        self.position_x = Some(x);
        self
    }

    pub fn position_y(mut self, y: i32) -> Self {
        self.position_y = Some(y);
        self
    }

    pub fn font_size(mut self, size: u8) -> Self {
        self.font_size = size;
        self
    }

    pub fn font_color(mut self, color: Color) -> Self {
        self.font_color = color;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the output format by name (`png`, `gif`, `jpg`, `jpeg`).
    pub fn format_name(mut self, name: &str) -> Result<Self, LabelError> {
        self.format = name.parse()?;
        Ok(self)
    }

    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// In-memory source; takes precedence over `file_path`.
    pub fn file_content(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.file_content = Some(content.into());
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn label_offset_x(mut self, offset: i32) -> Self {
        self.label_offset_x = offset;
        self
    }

    pub fn label_offset_y(mut self, offset: i32) -> Self {
        self.label_offset_y = offset;
        self
    }

    pub fn box_padding(mut self, padding: i32) -> Self {
        self.box_style.padding = padding;
        self
    }

    pub fn box_border_thickness(mut self, thickness: u32) -> Self {
        self.box_style.border_thickness = thickness;
        self
    }

    pub fn box_border_color(mut self, color: Color) -> Self {
        self.box_style.border_color = color;
        self
    }

    pub fn box_background_color(mut self, color: Color) -> Self {
        self.box_style.background_color = color;
        self
    }

    pub fn limits(mut self, limits: SourceLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn build(self) -> Result<LabelConfig, LabelError> {
        let font_size = FontSize::new(self.font_size)?;

        if !(1..=100).contains(&self.quality) {
            return Err(LabelError::invalid_param(
                "targetFileQuality",
                format!("must be between 1 and 100, got {}", self.quality),
            ));
        }

        let source = SourceImage::select(self.file_path, self.file_content)?;

        let placement = match (self.position_x, self.position_y) {
            (Some(x), Some(y)) => Placement::explicit(x, y),
            _ => Placement::anchored(self.position, self.label_offset_x, self.label_offset_y),
        };

        Ok(LabelConfig {
            text: self.text,
            placement,
            font_size,
            font_color: self.font_color,
            background_color: self.background_color,
            box_style: self.box_style,
            format: self.format,
            source,
            quality: self.quality,
            limits: self.limits,
        })
    }
}

/// Turn named options into a validated [`LabelConfig`].
///
/// The output format is checked first so an unsupported format is reported
/// before any other problem.
pub fn configure(options: &LabelOptions) -> Result<LabelConfig, LabelError> {
    let mut builder = LabelConfig::builder();

    if let Some(format) = options.format.as_deref() {
        builder = builder.format_name(format)?;
    }
    if let Some(text) = &options.text {
        builder = builder.text(text.clone());
    }
    if let Some(position) = &options.position {
        builder = builder.position(position.resolve()?);
    }
    if let Some(x) = options.position_x {
        builder = builder.position_x(x);
    }
    if let Some(y) = options.position_y {
        builder = builder.position_y(y);
    }
    if let Some(size) = options.font_size {
        builder = builder.font_size(FontSize::try_from(size)?.get());
    }
    if let Some(color) = options.font_color.as_deref() {
        builder = builder.font_color(parse_hex_color(color)?);
    }
    if let Some(color) = options.background_color.as_deref() {
        builder = builder.background_color(parse_hex_color(color)?);
    }
    if let Some(quality) = options.target_file_quality {
        builder = builder.quality(ranged_u8("targetFileQuality", quality, 1, 100)?);
    }
    if let Some(offset) = options.label_offset_x {
        builder = builder.label_offset_x(offset);
    }
    if let Some(offset) = options.label_offset_y {
        builder = builder.label_offset_y(offset);
    }
    if let Some(padding) = options.box_padding {
        builder = builder.box_padding(padding);
    }
    if let Some(thickness) = options.box_border_thickness {
        let thickness = u32::try_from(thickness).map_err(|_| {
            LabelError::invalid_param(
                "boxBorderThickness",
                format!("must not be negative, got {}", thickness),
            )
        })?;
        builder = builder.box_border_thickness(thickness);
    }
    if let Some(color) = options.box_border_color.as_deref() {
        builder = builder.box_border_color(parse_hex_color(color)?);
    }
    if let Some(color) = options.box_background_color.as_deref() {
        builder = builder.box_background_color(parse_hex_color(color)?);
    }
    if let Some(path) = &options.file_path {
        builder = builder.file_path(path.clone());
    }
    if let Some(content) = options.decoded_file_content()? {
        builder = builder.file_content(content);
    }

    builder.build()
}

fn ranged_u8(param: &str, value: i64, min: u8, max: u8) -> Result<u8, LabelError> {
    u8::try_from(value)
        .ok()
        .filter(|v| (min..=max).contains(v))
        .ok_or_else(|| {
            LabelError::invalid_param(param, format!("must be between {} and {}, got {}", min, max, value))
        })
}
