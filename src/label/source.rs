//! Source image acquisition.
//!
//! A render reads its input either from a file or from an in-memory buffer
//! and decodes it with the `image` crate, guessing the format from content.
//! Inputs are checked against [`SourceLimits`] before and after decoding to
//! keep oversized or decompression-bomb images out of the pipeline.

use std::borrow::Cow;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::io::Reader as ImageReader;
use image::DynamicImage;
use tracing::debug;

use crate::error::LabelError;

/// Default maximum encoded input size (50 MiB).
pub const DEFAULT_MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Default maximum decoded pixel count (100 megapixels).
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

/// Where the source image comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum SourceImage {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

impl SourceImage {
    /// Pick the source from optional path and content, preferring content.
    ///
    /// Empty paths and empty buffers count as absent.
    pub fn select(path: Option<PathBuf>, content: Option<Vec<u8>>) -> Result<Self, LabelError> {
        match (path.filter(|p| !p.as_os_str().is_empty()), content.filter(|c| !c.is_empty())) {
            (_, Some(bytes)) => Ok(Self::Bytes(bytes)),
            (Some(path), None) => Ok(Self::Path(path)),
            (None, None) => Err(LabelError::SourceImage(
                "no source image provided: set a file path or file content".to_string(),
            )),
        }
    }

    /// Load the raw encoded bytes, borrowing in-memory content.
    pub fn read(&self, limits: &SourceLimits) -> Result<Cow<'_, [u8]>, LabelError> {
        let bytes = match self {
            Self::Bytes(bytes) => Cow::Borrowed(bytes.as_slice()),
            Self::Path(path) => Cow::Owned(read_file(path, limits)?),
        };
        limits.check_file_size(bytes.len())?;
        Ok(bytes)
    }
}

fn read_file(path: &Path, limits: &SourceLimits) -> Result<Vec<u8>, LabelError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        LabelError::SourceImage(format!("cannot read '{}': {}", path.display(), e))
    })?;
    limits.check_file_size(usize::try_from(metadata.len()).unwrap_or(usize::MAX))?;

    std::fs::read(path)
        .map_err(|e| LabelError::SourceImage(format!("cannot read '{}': {}", path.display(), e)))
}

/// Size limits applied to source images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLimits {
    /// Maximum encoded input size in bytes
    pub max_file_size: usize,
    /// Maximum decoded width * height
    pub max_pixels: u64,
}

impl Default for SourceLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl SourceLimits {
    pub fn check_file_size(&self, size: usize) -> Result<(), LabelError> {
        if size > self.max_file_size {
            return Err(LabelError::FileTooLarge {
                size,
                max_size: self.max_file_size,
            });
        }
        Ok(())
    }

    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<(), LabelError> {
        if width as u64 * height as u64 > self.max_pixels {
            return Err(LabelError::image_too_large(width, height, self.max_pixels));
        }
        Ok(())
    }
}

/// Decode image data into a DynamicImage
///
/// Dimensions are checked from the header before pixel data is decoded.
pub fn decode_image(data: &[u8], limits: &SourceLimits) -> Result<DynamicImage, LabelError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| LabelError::decode_failed(e.to_string()))?;

    let format = reader
        .format()
        .ok_or_else(|| LabelError::decode_failed("unrecognized image format"))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| LabelError::decode_failed(e.to_string()))?;
    limits.check_dimensions(width, height)?;

    let image = image::load_from_memory_with_format(data, format)
        .map_err(|e| LabelError::decode_failed(e.to_string()))?;

    debug!(?format, width, height, "source image decoded");
    Ok(image)
}
