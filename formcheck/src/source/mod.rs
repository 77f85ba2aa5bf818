//! Landmark sources
//!
//! A source yields one [`SourceFrame`] per video frame: either "no pose" or the
//! joints the detector reported. Pose detection itself is out of scope; the
//! sources here replay recorded landmark streams or synthesize one.
//!
//! - [`RecordingSource`] - JSON-lines recordings (named joints or
//!   MediaPipe-indexed points)
//! - [`SimulatedSquat`] - deterministic squatting figure for demos and tests

pub mod recording;
pub mod simulated;

pub use recording::RecordingSource;
pub use simulated::SimulatedSquat;

use crate::domain::{FrameId, SourceError, Timestamp};
use crate::landmarks::LandmarkFrame;

/// Frame rate assumed when a recording carries no timestamps
pub const DEFAULT_FPS: f64 = 30.0;

/// One frame produced by a [`LandmarkSource`]
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFrame {
    pub id: FrameId,
    pub timestamp: Timestamp,
    pub frame: LandmarkFrame,
}

/// Producer of landmark frames
///
/// `Ok(None)` marks the end of the stream.
pub trait LandmarkSource {
    /// Short human-readable name for logs
    fn name(&self) -> &'static str;

    /// Next frame, or `None` once the stream is exhausted
    ///
    /// # Errors
    /// Returns a [`SourceError`] if the underlying stream cannot be read or
    /// holds a malformed frame.
    fn next_frame(&mut self) -> Result<Option<SourceFrame>, SourceError>;
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn next_frame(&mut self) -> Result<Option<SourceFrame>, SourceError> {
        (**self).next_frame()
    }
}
