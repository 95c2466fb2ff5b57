//! Error types for labeling operations
//!
//! Every failure of a render call maps onto one of four categories so callers
//! can decide how to report it: configuration problems, decode problems,
//! encode problems, and output (I/O) problems. None of them are retried.

use thiserror::Error;

/// Broad category of a [`LabelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any pixels were touched
    Config,
    /// The source image could not be decoded or exceeds limits
    Decode,
    /// The target-format encoder failed
    Encode,
    /// The encoded image could not be written to its sink
    Output,
}

/// Errors that can occur while configuring or rendering a label
#[derive(Error, Debug)]
pub enum LabelError {
    // === Configuration Errors ===
    #[error("Unsupported output format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Invalid position: {value}")]
    InvalidPosition { value: String },

    #[error("Invalid color '{value}': {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source image error: {0}")]
    SourceImage(String),

    // === Decoding Errors ===
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("File size {size} bytes exceeds maximum {max_size} bytes")]
    FileTooLarge { size: usize, max_size: usize },

    #[error("Image dimensions {width}x{height} ({pixels} pixels) exceed limit of {max_pixels} pixels")]
    ImageTooLarge {
        width: u32,
        height: u32,
        pixels: u64,
        max_pixels: u64,
    },

    // === Encoding Errors ===
    #[error("Failed to encode to {format}: {message}")]
    Encode { format: String, message: String },

    // === Output Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabelError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LabelError::UnsupportedFormat { .. }
            | LabelError::InvalidPosition { .. }
            | LabelError::InvalidColor { .. }
            | LabelError::InvalidParameter { .. }
            | LabelError::Config(_)
            | LabelError::SourceImage(_) => ErrorKind::Config,

            LabelError::Decode(_)
            | LabelError::FileTooLarge { .. }
            | LabelError::ImageTooLarge { .. } => ErrorKind::Decode,

            LabelError::Encode { .. } => ErrorKind::Encode,

            LabelError::Io(_) => ErrorKind::Output,
        }
    }

    /// Maps label errors to HTTP status codes for hosts serving rendered images
    ///
    /// Status mapping:
    /// - UnsupportedFormat → 415 (Unsupported Media Type)
    /// - FileTooLarge → 413 (Payload Too Large)
    /// - other configuration and decode errors → 400 (Bad Request)
    /// - Encode, Io → 500 (Internal Server Error)
    pub fn to_http_status(&self) -> u16 {
        match self {
            LabelError::UnsupportedFormat { .. } => 415,
            LabelError::FileTooLarge { .. } => 413,
            LabelError::Encode { .. } | LabelError::Io(_) => 500,
            _ => 400,
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        LabelError::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn invalid_position(value: impl Into<String>) -> Self {
        LabelError::InvalidPosition {
            value: value.into(),
        }
    }

    pub fn invalid_color(value: impl Into<String>, reason: impl Into<String>) -> Self {
        LabelError::InvalidColor {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        LabelError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    pub fn decode_failed(message: impl Into<String>) -> Self {
        LabelError::Decode(message.into())
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        LabelError::Encode {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn image_too_large(width: u32, height: u32, max_pixels: u64) -> Self {
        LabelError::ImageTooLarge {
            width,
            height,
            pixels: width as u64 * height as u64,
            max_pixels,
        }
    }
}
