//! Synthetic squatter
//!
//! Generates a MediaPipe-indexed landmark buffer per frame from a simple
//! two-segment leg model, so the whole pipeline can run without a recording.
//!
//! ```text
//!        shoulders          lean b grows with depth
//!           \
//!            hip ─┐         thigh tilt t from vertical
//!                 knee      shin tilt s from vertical
//!                /          knee angle = 180 − (s + t)
//!           ankle
//! ```
//!
//! One cycle runs standing → descending → bottom → ascending → standing. At the
//! bottom the knee angle is 80° and the hip sits just below the knee.

// Frame counters convert to f64 for timing
#![allow(clippy::cast_precision_loss)]

use formcheck_common::{Joint, Point2, MEDIAPIPE_LANDMARK_COUNT};

use super::{LandmarkSource, SourceFrame};
use crate::domain::{FrameId, SourceError, Timestamp};
use crate::landmarks::extract_joints;

/// Frames per squat cycle
pub const DEFAULT_CYCLE_FRAMES: u32 = 120;

const SHIN_LENGTH: f64 = 0.2;
const THIGH_LENGTH: f64 = 0.2;
const TORSO_LENGTH: f64 = 0.3;
const ANKLE_Y: f64 = 0.9;
/// Horizontal distance of each ankle from the body's center line
const STANCE_HALF_WIDTH: f64 = 0.08;
const CENTER_X: f64 = 0.5;

const BOTTOM_THIGH_TILT_DEG: f64 = 94.0;
const BOTTOM_SHIN_TILT_DEG: f64 = 6.0;
const BOTTOM_TORSO_LEAN_DEG: f64 = 25.0;

/// Cycle fractions at which each part of the movement ends
const STAND_END: f64 = 0.15;
const DESCENT_END: f64 = 0.45;
const HOLD_END: f64 = 0.60;
const ASCENT_END: f64 = 0.90;

/// Deterministic squatting figure
#[derive(Debug, Clone)]
pub struct SimulatedSquat {
    fps: f64,
    cycle_frames: u32,
    max_frames: Option<u64>,
    frame: u64,
}

impl SimulatedSquat {
    /// Endless squatter at `fps` frames per second
    #[must_use]
    pub fn new(fps: f64) -> Self {
        Self {
            fps: if fps > 0.0 { fps } else { super::DEFAULT_FPS },
            cycle_frames: DEFAULT_CYCLE_FRAMES,
            max_frames: None,
            frame: 0,
        }
    }

    /// Frames per squat cycle (minimum 4)
    #[must_use]
    pub fn with_cycle_frames(mut self, cycle_frames: u32) -> Self {
        self.cycle_frames = cycle_frames.max(4);
        self
    }

    /// Stop after `reps` full cycles
    #[must_use]
    pub fn with_reps(mut self, reps: u32) -> Self {
        self.max_frames = Some(u64::from(reps) * u64::from(self.cycle_frames));
        self
    }

    #[must_use]
    pub fn cycle_frames(&self) -> u32 {
        self.cycle_frames
    }

    /// Squat depth in `[0, 1]` at a point of the cycle
    fn depth_at(progress: f64) -> f64 {
        let ramp = |from: f64, to: f64| {
            let x = ((progress - from) / (to - from)).clamp(0.0, 1.0);
            x * x * (3.0 - 2.0 * x)
        };

        if progress < STAND_END {
            0.0
        } else if progress < DESCENT_END {
            ramp(STAND_END, DESCENT_END)
        } else if progress < HOLD_END {
            1.0
        } else if progress < ASCENT_END {
            1.0 - ramp(HOLD_END, ASCENT_END)
        } else {
            0.0
        }
    }

    /// Full 33-point landmark buffer for a given depth
    fn landmarks(depth: f64) -> Vec<Point2> {
        let shin_tilt = (BOTTOM_SHIN_TILT_DEG * depth).to_radians();
        let thigh_tilt = (BOTTOM_THIGH_TILT_DEG * depth).to_radians();
        let lean = (BOTTOM_TORSO_LEAN_DEG * depth).to_radians();

        let leg = |ankle_x: f64| {
            let ankle = Point2::new(ankle_x, ANKLE_Y);
            let knee = Point2::new(
                ankle.x + SHIN_LENGTH * shin_tilt.sin(),
                ankle.y - SHIN_LENGTH * shin_tilt.cos(),
            );
            let hip = Point2::new(
                knee.x - THIGH_LENGTH * thigh_tilt.sin(),
                knee.y - THIGH_LENGTH * thigh_tilt.cos(),
            );
            (hip, knee, ankle)
        };

        let (left_hip, left_knee, left_ankle) = leg(CENTER_X - STANCE_HALF_WIDTH);
        let (right_hip, right_knee, right_ankle) = leg(CENTER_X + STANCE_HALF_WIDTH);

        let hip_center = Point2::new((left_hip.x + right_hip.x) / 2.0, left_hip.y);
        let shoulder_center = Point2::new(
            hip_center.x + TORSO_LENGTH * lean.sin(),
            hip_center.y - TORSO_LENGTH * lean.cos(),
        );
        let shoulder = |dx: f64| Point2::new(shoulder_center.x + dx, shoulder_center.y);
        let nose = Point2::new(shoulder_center.x, shoulder_center.y - 0.1);

        let mut raw = vec![nose; MEDIAPIPE_LANDMARK_COUNT];
        let mut put = |joint: Joint, point: Point2| raw[joint.mediapipe_index()] = point;

        put(Joint::Nose, nose);
        put(Joint::LeftShoulder, shoulder(-0.1));
        put(Joint::RightShoulder, shoulder(0.1));
        put(Joint::LeftHip, left_hip);
        put(Joint::RightHip, right_hip);
        put(Joint::LeftKnee, left_knee);
        put(Joint::RightKnee, right_knee);
        put(Joint::LeftAnkle, left_ankle);
        put(Joint::RightAnkle, right_ankle);
        put(Joint::LeftHeel, Point2::new(left_ankle.x - 0.02, ANKLE_Y + 0.03));
        put(Joint::RightHeel, Point2::new(right_ankle.x - 0.02, ANKLE_Y + 0.03));
        put(Joint::LeftFootIndex, Point2::new(left_ankle.x + 0.06, ANKLE_Y + 0.04));
        put(Joint::RightFootIndex, Point2::new(right_ankle.x + 0.06, ANKLE_Y + 0.04));

        raw
    }
}

impl LandmarkSource for SimulatedSquat {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn next_frame(&mut self) -> Result<Option<SourceFrame>, SourceError> {
        if self.max_frames.is_some_and(|max| self.frame >= max) {
            return Ok(None);
        }

        let cycle = u64::from(self.cycle_frames);
        let progress = (self.frame % cycle) as f64 / cycle as f64;
        let joints = extract_joints(&Self::landmarks(Self::depth_at(progress)));

        let frame = SourceFrame {
            id: FrameId(self.frame),
            timestamp: Timestamp(self.frame as f64 / self.fps),
            frame: joints.into(),
        };
        self.frame += 1;
        Ok(Some(frame))
    }
}
