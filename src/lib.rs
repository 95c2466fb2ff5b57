// Image labeler library

pub mod config;
pub mod error;
pub mod label;
pub mod logging;

pub use config::{configure, LabelConfig, LabelConfigBuilder, LabelOptions};
pub use error::{ErrorKind, LabelError};
pub use label::{render, render_image, Labeler, OutputSink, RenderResult};
