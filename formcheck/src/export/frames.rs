//! Per-frame analysis export
//!
//! Collects every analyzed frame and writes them, with the session summary,
//! as one JSON document:
//!
//! ```text
//! {
//!   "frames": [{"frame": 0, "timestamp": 0.0, "score": 72.0, "analysis": {...}}, ...],
//!   "summary": {...}
//! }
//! ```

use serde::Serialize;
use std::io::Write;

use crate::analysis::AnalysisResult;
use crate::domain::{ExportError, FormScore, FrameId, Timestamp};
use crate::session::SessionSummary;

#[derive(Debug, Clone, Serialize)]
pub struct ExportedFrame {
    pub frame: u64,
    pub timestamp: f64,
    pub score: f64,
    pub analysis: AnalysisResult,
}

#[derive(Serialize)]
struct FrameDocument<'a> {
    frames: &'a [ExportedFrame],
    summary: &'a SessionSummary,
}

/// Accumulates analyzed frames for a JSON export
#[derive(Debug, Default)]
pub struct FrameExporter {
    frames: Vec<ExportedFrame>,
}

impl FrameExporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        id: FrameId,
        timestamp: Timestamp,
        score: FormScore,
        analysis: &AnalysisResult,
    ) {
        self.frames.push(ExportedFrame {
            frame: id.0,
            timestamp: timestamp.as_seconds(),
            score: score.value(),
            analysis: analysis.clone(),
        });
    }

    /// Write the export document to any writer (file, stdout, buffer)
    ///
    /// # Errors
    /// Returns an error if serialization or the underlying write fails.
    pub fn export<W: Write>(&self, writer: W, summary: &SessionSummary) -> Result<(), ExportError> {
        let document = FrameDocument { frames: &self.frames, summary };
        serde_json::to_writer_pretty(writer, &document)?;
        Ok(())
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
