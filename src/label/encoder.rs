//! Output encoders
//!
//! Provides a trait-based encoder system that allows:
//! - One encoder per output format behind a common interface
//! - A single 1-100 quality scale mapped onto each format's own parameter
//! - Format-specific color handling (JPEG drops alpha, GIF quantizes)

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use image::codecs::gif::GifEncoder as ImageGifEncoder;
use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder as ImagePngEncoder};
use image::{ColorType, ImageEncoder as _, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::LabelError;

/// Divisor mapping the 1-100 quality scale onto PNG's 0-9 compression levels.
const PNG_QUALITY_STEP: f64 = 11.111111;

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Gif,
    Jpeg,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Jpeg => "jpeg",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "gif" => Ok(OutputFormat::Gif),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            _ => Err(LabelError::unsupported_format(s)),
        }
    }
}

/// Map a 1-100 quality (higher is better) onto a 0-9 PNG compression level
/// (0 is least compression).
///
/// The PNG encoder only has three settings, so levels 0-3 encode as
/// `Fast`, 4-6 as `Default` and 7-9 as `Best`. Quality 100 (level 0) still
/// compresses; it is not stored uncompressed.
pub fn png_compression_level(quality: u8) -> u8 {
    ((quality as f64 - 100.0) / PNG_QUALITY_STEP).abs().round() as u8
}

/// Format-specific encoder parameter derived from the label quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderSettings {
    /// PNG compression level, 0-9, bucketed by [`png_compression_level`]
    CompressionLevel(u8),
    /// JPEG quality, 1-100
    Quality(u8),
    /// Format has no tunable parameter
    None,
}

impl EncoderSettings {
    /// Settings for `format` at the given 1-100 quality.
    pub fn for_format(format: OutputFormat, quality: u8) -> Self {
        let quality = quality.clamp(1, 100);
        match format {
            OutputFormat::Png => Self::CompressionLevel(png_compression_level(quality)),
            OutputFormat::Jpeg => Self::Quality(quality),
            OutputFormat::Gif => Self::None,
        }
    }
}

/// Result of encoding an image
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// The encoded image data
    pub data: Vec<u8>,
    /// The output format
    pub format: OutputFormat,
    /// Content-Type header value
    pub content_type: &'static str,
}

impl EncodedImage {
    pub fn new(data: Vec<u8>, format: OutputFormat) -> Self {
        Self {
            data,
            content_type: format.content_type(),
            format,
        }
    }
}

/// Trait for image encoders
///
/// The trait is object-safe so [`EncoderFactory`] can hand out boxed
/// encoders chosen at runtime.
pub trait ImageEncoder: Send + Sync {
    /// The output format this encoder produces
    fn format(&self) -> OutputFormat;

    /// Encode an RGBA image
    fn encode(&self, image: &RgbaImage, settings: EncoderSettings) -> Result<EncodedImage, LabelError>;
}

/// PNG encoder using the image crate
pub struct PngEncoder;

impl PngEncoder {
    fn compression(level: u8) -> CompressionType {
        match level {
            0..=3 => CompressionType::Fast,
            4..=6 => CompressionType::Default,
            _ => CompressionType::Best,
        }
    }
}

impl ImageEncoder for PngEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn encode(&self, image: &RgbaImage, settings: EncoderSettings) -> Result<EncodedImage, LabelError> {
        let level = match settings {
            EncoderSettings::CompressionLevel(level) => level,
            _ => png_compression_level(75),
        };

        let mut output = Cursor::new(Vec::new());
        let encoder =
            ImagePngEncoder::new_with_quality(&mut output, Self::compression(level), FilterType::Adaptive);

        encoder
            .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
            .map_err(|e| LabelError::encode_failed("png", e.to_string()))?;

        Ok(EncodedImage::new(output.into_inner(), OutputFormat::Png))
    }
}

/// JPEG encoder using the image crate
pub struct JpegEncoder;

impl ImageEncoder for JpegEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Jpeg
    }

    fn encode(&self, image: &RgbaImage, settings: EncoderSettings) -> Result<EncodedImage, LabelError> {
        let quality = match settings {
            EncoderSettings::Quality(quality) => quality,
            _ => 75,
        };

        // JPEG has no alpha channel
        let rgb_data = rgba_to_rgb(image.as_raw());

        let mut output = Cursor::new(Vec::new());
        let encoder = ImageJpegEncoder::new_with_quality(&mut output, quality);

        encoder
            .write_image(&rgb_data, image.width(), image.height(), ColorType::Rgb8)
            .map_err(|e| LabelError::encode_failed("jpeg", e.to_string()))?;

        Ok(EncodedImage::new(output.into_inner(), OutputFormat::Jpeg))
    }
}

/// GIF encoder using the image crate
///
/// Quality settings are ignored; the frame is quantized to a 256-color
/// palette by the encoder.
pub struct GifEncoder;

impl ImageEncoder for GifEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Gif
    }

    fn encode(&self, image: &RgbaImage, _settings: EncoderSettings) -> Result<EncodedImage, LabelError> {
        let mut output = Vec::new();
        {
            // The GIF trailer is written when the encoder is dropped
            let mut encoder = ImageGifEncoder::new(&mut output);
            encoder
                .encode(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
                .map_err(|e| LabelError::encode_failed("gif", e.to_string()))?;
        }

        Ok(EncodedImage::new(output, OutputFormat::Gif))
    }
}

/// Factory for creating encoders based on output format
pub struct EncoderFactory;

impl EncoderFactory {
    /// Create an encoder for the specified output format
    pub fn create(format: OutputFormat) -> Box<dyn ImageEncoder> {
        match format {
            OutputFormat::Png => Box::new(PngEncoder),
            OutputFormat::Gif => Box::new(GifEncoder),
            OutputFormat::Jpeg => Box::new(JpegEncoder),
        }
    }
}

/// Encode `image` as `format` at the given 1-100 quality.
pub fn encode_image(image: &RgbaImage, format: OutputFormat, quality: u8) -> Result<EncodedImage, LabelError> {
    let settings = EncoderSettings::for_format(format, quality);
    EncoderFactory::create(format).encode(image, settings)
}

/// Convert RGBA to RGB by discarding alpha channel
fn rgba_to_rgb(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for chunk in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&chunk[..3]);
    }
    rgb
}
