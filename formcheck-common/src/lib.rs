//! # Shared Landmark Vocabulary (Landmark Source ↔ Analyzer)
//!
//! Defines the joint identifiers and coordinate type shared between landmark
//! producers (pose-estimation backends, recordings, simulators) and the form
//! analysis engine. The crate is `no_std` so adapters running next to an
//! embedded or WASM detector can depend on it without pulling in `std`.
//!
//! ## Coordinate Convention
//!
//! All coordinates are normalized to `[0, 1] × [0, 1]` with the origin in the
//! top-left corner of the frame, `x` growing rightward and `y` growing downward
//! (the MediaPipe convention).
//!
//! ## Key Types
//!
//! - [`Joint`] - Enumerated body joint used by the squat analysis
//! - [`Side`] - Left/right body side
//! - [`Point2`] - Normalized 2-D landmark coordinate
//!
//! ## Features
//!
//! - `serde` - `Serialize`/`Deserialize` for all types; joints serialize as
//!   their snake-case names (`"left_knee"`)

#![no_std]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Layout Constants
// ============================================================================

/// Number of landmarks produced by the MediaPipe Pose model
pub const MEDIAPIPE_LANDMARK_COUNT: usize = 33;

// ============================================================================
// Shared Data Structures
// ============================================================================

/// Normalized 2-D landmark coordinate
///
/// **Memory Layout**: `#[repr(C)]` so adapters can hand over detector buffers
/// of `(x, y)` pairs without re-packing.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point2 {
    /// Horizontal position (0 = left edge, 1 = right edge)
    pub x: f64,
    /// Vertical position (0 = top edge, 1 = bottom edge)
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Body side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides in reporting order (left first)
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Capitalized label for user-facing text
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// Body joint tracked by the squat analysis
///
/// Discriminants are dense (`0..Joint::COUNT`) so a joint can index a
/// fixed-size table directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Joint {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl Joint {
    /// Number of tracked joints
    pub const COUNT: usize = 13;

    /// All joints in discriminant order
    pub const ALL: [Joint; Joint::COUNT] = [
        Joint::Nose,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
        Joint::LeftHeel,
        Joint::RightHeel,
        Joint::LeftFootIndex,
        Joint::RightFootIndex,
    ];

    /// Dense index (`0..Joint::COUNT`)
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name (`"left_foot_index"`)
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::LeftShoulder => "left_shoulder",
            Joint::RightShoulder => "right_shoulder",
            Joint::LeftHip => "left_hip",
            Joint::RightHip => "right_hip",
            Joint::LeftKnee => "left_knee",
            Joint::RightKnee => "right_knee",
            Joint::LeftAnkle => "left_ankle",
            Joint::RightAnkle => "right_ankle",
            Joint::LeftHeel => "left_heel",
            Joint::RightHeel => "right_heel",
            Joint::LeftFootIndex => "left_foot_index",
            Joint::RightFootIndex => "right_foot_index",
        }
    }

    /// Parse a snake-case joint name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Joint> {
        Joint::ALL.into_iter().find(|joint| joint.name() == name)
    }

    /// Landmark index in the MediaPipe Pose 33-point layout
    #[must_use]
    pub const fn mediapipe_index(self) -> usize {
        match self {
            Joint::Nose => 0,
            Joint::LeftShoulder => 11,
            Joint::RightShoulder => 12,
            Joint::LeftHip => 23,
            Joint::RightHip => 24,
            Joint::LeftKnee => 25,
            Joint::RightKnee => 26,
            Joint::LeftAnkle => 27,
            Joint::RightAnkle => 28,
            Joint::LeftHeel => 29,
            Joint::RightHeel => 30,
            Joint::LeftFootIndex => 31,
            Joint::RightFootIndex => 32,
        }
    }

    /// Shoulder joint on the given side
    #[must_use]
    pub const fn shoulder(side: Side) -> Joint {
        match side {
            Side::Left => Joint::LeftShoulder,
            Side::Right => Joint::RightShoulder,
        }
    }

    /// Hip joint on the given side
    #[must_use]
    pub const fn hip(side: Side) -> Joint {
        match side {
            Side::Left => Joint::LeftHip,
            Side::Right => Joint::RightHip,
        }
    }

    /// Knee joint on the given side
    #[must_use]
    pub const fn knee(side: Side) -> Joint {
        match side {
            Side::Left => Joint::LeftKnee,
            Side::Right => Joint::RightKnee,
        }
    }

    /// Ankle joint on the given side
    #[must_use]
    pub const fn ankle(side: Side) -> Joint {
        match side {
            Side::Left => Joint::LeftAnkle,
            Side::Right => Joint::RightAnkle,
        }
    }
}
