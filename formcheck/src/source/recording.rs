//! JSON-lines landmark recordings
//!
//! One frame per line, in either of two shapes:
//!
//! ```text
//! {"t": 0.033, "landmarks": {"left_hip": [0.4, 0.5], "left_knee": [0.4, 0.7]}}
//! {"t": 0.066, "points": [[0.5, 0.2], [0.51, 0.18], ...]}
//! {"t": 0.100, "landmarks": null}
//! ```
//!
//! `points` is a MediaPipe-indexed buffer and goes through
//! [`extract_joints`]. A line with neither field is a frame without a pose.
//! `t` is optional; missing timestamps fall back to `frame_index / fps`.

// Frame indices convert to f64 for fallback timestamps
#![allow(clippy::cast_precision_loss)]

use log::{debug, info};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{LandmarkSource, SourceFrame, DEFAULT_FPS};
use crate::domain::{FrameId, SourceError, Timestamp};
use crate::landmarks::{extract_joints, JointSet, LandmarkFrame};
use formcheck_common::Point2;

#[derive(Debug, Deserialize)]
struct RecordedFrame {
    #[serde(default)]
    t: Option<f64>,
    #[serde(default)]
    landmarks: Option<BTreeMap<String, [f64; 2]>>,
    #[serde(default)]
    points: Option<Vec<[f64; 2]>>,
}

impl RecordedFrame {
    fn into_frame(self) -> LandmarkFrame {
        if let Some(named) = self.landmarks {
            JointSet::from_named(named.iter().map(|(name, &xy)| (name.as_str(), xy))).into()
        } else if let Some(points) = self.points {
            let raw: Vec<Point2> = points.into_iter().map(Point2::from).collect();
            extract_joints(&raw).into()
        } else {
            LandmarkFrame::NoPose
        }
    }
}

/// Replays a JSON-lines recording
pub struct RecordingSource<R> {
    reader: R,
    fps: f64,
    line_number: usize,
    frames_read: u64,
    buffer: String,
}

impl RecordingSource<BufReader<File>> {
    /// Open a recording file
    ///
    /// # Errors
    /// Returns [`SourceError::RecordingOpenFailed`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::RecordingOpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Replaying recording {}", path.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> RecordingSource<R> {
    #[must_use]
    pub fn from_reader(reader: R) -> Self {
        Self { reader, fps: DEFAULT_FPS, line_number: 0, frames_read: 0, buffer: String::new() }
    }

    /// Frame rate used for frames without a `t` field
    ///
    /// Non-positive values are ignored.
    #[must_use]
    pub fn with_fps(mut self, fps: f64) -> Self {
        if fps > 0.0 {
            self.fps = fps;
        }
        self
    }
}

impl<R: BufRead> LandmarkSource for RecordingSource<R> {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn next_frame(&mut self) -> Result<Option<SourceFrame>, SourceError> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                debug!("Recording finished after {} frames", self.frames_read);
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.is_empty() {
                continue;
            }

            let recorded: RecordedFrame = serde_json::from_str(line).map_err(|e| {
                SourceError::MalformedFrame { line: self.line_number, reason: e.to_string() }
            })?;

            let id = FrameId(self.frames_read);
            let timestamp = Timestamp(recorded.t.unwrap_or(self.frames_read as f64 / self.fps));
            self.frames_read += 1;

            return Ok(Some(SourceFrame { id, timestamp, frame: recorded.into_frame() }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_common::Joint;
    use std::io::Cursor;

    fn source(text: &str) -> RecordingSource<Cursor<&str>> {
        RecordingSource::from_reader(Cursor::new(text))
    }

    #[test]
    fn test_named_landmarks() {
        let line = r#"{"t": 1.5, "landmarks": {"left_hip": [0.4, 0.5], "left_knee": [0.4, 0.7]}}"#;
        let mut src = source(line);
        let frame = src.next_frame().unwrap().unwrap();

        assert_eq!(frame.id, FrameId(0));
        assert_eq!(frame.timestamp, Timestamp(1.5));
        let joints = frame.frame.joints().unwrap();
        assert_eq!(joints.len(), 2);
        assert_eq!(joints.get(Joint::LeftKnee), Some(Point2::new(0.4, 0.7)));
        assert!(src.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_indexed_points() {
        let points: Vec<String> =
            (0..33).map(|i| format!("[{}, 0.5]", f64::from(i) / 100.0)).collect();
        let line = format!(r#"{{"points": [{}]}}"#, points.join(","));
        let frame = source(&line).next_frame().unwrap().unwrap();

        let joints = frame.frame.joints().unwrap();
        assert_eq!(joints.len(), Joint::COUNT);
        assert_eq!(joints.get(Joint::LeftKnee), Some(Point2::new(0.25, 0.5)));
    }

    #[test]
    fn test_no_pose_and_blank_lines() {
        let mut src = source("{\"landmarks\": null}\n\n{}\n");
        assert_eq!(src.next_frame().unwrap().unwrap().frame, LandmarkFrame::NoPose);
        assert_eq!(src.next_frame().unwrap().unwrap().frame, LandmarkFrame::NoPose);
        assert!(src.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_missing_timestamps_use_fps() {
        let mut src = source("{}\n{}\n{}\n").with_fps(10.0);
        let times: Vec<f64> = std::iter::from_fn(|| src.next_frame().unwrap())
            .map(|f| f.timestamp.as_seconds())
            .collect();
        assert_eq!(times.len(), 3);
        assert!((times[2] - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let mut src = source("{}\n\nnot json\n");
        src.next_frame().unwrap();
        match src.next_frame() {
            Err(SourceError::MalformedFrame { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed frame, got {other:?}"),
        }
    }

    #[test]
    fn test_open_missing_file() {
        let result = RecordingSource::open("/nonexistent/formcheck/recording.jsonl");
        assert!(matches!(result, Err(SourceError::RecordingOpenFailed { .. })));
    }
}
