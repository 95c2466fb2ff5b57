//! Per-render metrics
//!
//! Tracks sizes and stage timings for a single render call so hosts can log
//! or export them.

use std::time::Duration;

use super::encoder::OutputFormat;

/// Render pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    Load,
    Measure,
    Composite,
    Encode,
}

/// Metrics for a single render call
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMetrics {
    /// Encoded source size in bytes (0 when a decoded image was supplied)
    pub source_size: usize,
    /// Encoded output size in bytes
    pub output_size: usize,
    /// Image dimensions (width, height)
    pub dimensions: (u32, u32),
    /// Output format used
    pub output_format: OutputFormat,
    /// Whether the font was shrunk to fit
    pub font_shrunk: bool,
    /// Time spent per stage
    pub stage_times: Vec<(RenderStage, Duration)>,
}

impl Default for RenderMetrics {
    fn default() -> Self {
        Self {
            source_size: 0,
            output_size: 0,
            dimensions: (0, 0),
            output_format: OutputFormat::Png,
            font_shrunk: false,
            stage_times: Vec::new(),
        }
    }
}

impl RenderMetrics {
    /// Record how long a stage took
    pub fn record(&mut self, stage: RenderStage, elapsed: Duration) {
        self.stage_times.push((stage, elapsed));
    }

    /// Time spent in `stage`, if it ran
    pub fn stage_time(&self, stage: RenderStage) -> Option<Duration> {
        self.stage_times
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, d)| *d)
    }

    /// Total time across all recorded stages
    pub fn total_time(&self) -> Duration {
        self.stage_times.iter().map(|(_, d)| *d).sum()
    }
}
