//! Output sinks for rendered images.
//!
//! The encoded bytes always stay in the [`RenderResult`](super::RenderResult);
//! a sink decides whether they are additionally written to disk.

use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use super::encoder::EncodedImage;
use crate::error::LabelError;

/// Destination for an encoded image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputSink {
    /// Keep the bytes in memory only
    #[default]
    Memory,
    /// Write to exactly this path
    File(PathBuf),
    /// Write to a freshly named file (`<uuid>.<ext>`) inside this directory
    TempDir(PathBuf),
}

impl OutputSink {
    /// Unique file in the system temporary directory.
    pub fn temp() -> Self {
        OutputSink::TempDir(std::env::temp_dir())
    }

    /// Write `encoded` and return the path written, if any.
    pub fn write(&self, encoded: &EncodedImage) -> Result<Option<PathBuf>, LabelError> {
        let path = match self {
            OutputSink::Memory => return Ok(None),
            OutputSink::File(path) => path.clone(),
            OutputSink::TempDir(dir) => unique_path(dir, encoded.format.extension()),
        };

        std::fs::write(&path, &encoded.data)?;
        debug!(path = %path.display(), bytes = encoded.data.len(), "rendered image written");
        Ok(Some(path))
    }
}

fn unique_path(dir: &Path, extension: &str) -> PathBuf {
    dir.join(format!("{}.{}", Uuid::new_v4(), extension))
}
