//! Squat depth and phase classification
//!
//! The phase is a pure function of the current frame's depth ratio; nothing
//! here remembers previous frames. Rep counting built on top of phase changes
//! lives in [`crate::session::SessionTracker`].

use formcheck_common::Joint;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::landmarks::JointSet;

// =============================================================================
// PHASE THRESHOLDS
// =============================================================================

/// Depth ratio below which the lifter is standing
pub const STANDING_MAX_RATIO: f64 = 0.10;

/// Depth ratio below which the lifter is still descending
pub const DESCENDING_MAX_RATIO: f64 = 0.30;

/// Depth ratio below which the lifter is at the bottom; deep squat beyond
pub const BOTTOM_MAX_RATIO: f64 = 0.60;

// =============================================================================
// PHASE
// =============================================================================

/// Squat movement phase for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SquatPhase {
    #[default]
    Standing,
    Descending,
    Bottom,
    DeepSquat,
}

impl SquatPhase {
    /// All phases in depth order
    pub const ALL: [SquatPhase; 4] =
        [SquatPhase::Standing, SquatPhase::Descending, SquatPhase::Bottom, SquatPhase::DeepSquat];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SquatPhase::Standing => "standing",
            SquatPhase::Descending => "descending",
            SquatPhase::Bottom => "bottom",
            SquatPhase::DeepSquat => "deep_squat",
        }
    }

    /// Bottom or deeper: reaching one of these completes the descent of a rep
    #[must_use]
    pub fn is_bottomed(self) -> bool {
        matches!(self, SquatPhase::Bottom | SquatPhase::DeepSquat)
    }
}

impl fmt::Display for SquatPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a depth ratio into a phase
///
/// Each boundary belongs to the deeper phase (`0.10` is already descending).
/// Anything at or past `0.60`, including ratios above 1.0 from unusual
/// poses and NaN, falls through to [`SquatPhase::DeepSquat`].
#[must_use]
pub fn classify_phase(depth_ratio: f64) -> SquatPhase {
    if depth_ratio < STANDING_MAX_RATIO {
        SquatPhase::Standing
    } else if depth_ratio < DESCENDING_MAX_RATIO {
        SquatPhase::Descending
    } else if depth_ratio < BOTTOM_MAX_RATIO {
        SquatPhase::Bottom
    } else {
        SquatPhase::DeepSquat
    }
}

// =============================================================================
// DEPTH
// =============================================================================

/// Depth ratio and phase of one frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DepthInfo {
    pub depth_ratio: f64,
    pub phase: SquatPhase,
    /// False when the reference leg was not fully visible; ratio and phase
    /// then hold their standing defaults.
    pub measured: bool,
}

/// Evaluate squat depth on the reference (left) leg
///
/// `thigh = |hip.y − knee.y|` and `depth_ratio = max(0, (knee.y − hip.y) / thigh)`.
/// A zero-length thigh yields ratio 0.0 and [`SquatPhase::Standing`].
#[must_use]
pub fn evaluate_depth(joints: &JointSet) -> DepthInfo {
    let Some((hip, knee, _ankle)) =
        joints.triplet(Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle)
    else {
        return DepthInfo::default();
    };

    let thigh_length = (hip.y - knee.y).abs();
    if thigh_length <= 0.0 {
        return DepthInfo { measured: true, ..DepthInfo::default() };
    }

    let depth_ratio = ((knee.y - hip.y) / thigh_length).max(0.0);
    DepthInfo { depth_ratio, phase: classify_phase(depth_ratio), measured: true }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_common::Point2;

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(classify_phase(0.0), SquatPhase::Standing);
        assert_eq!(classify_phase(0.099), SquatPhase::Standing);
        assert_eq!(classify_phase(0.10), SquatPhase::Descending);
        assert_eq!(classify_phase(0.299), SquatPhase::Descending);
        assert_eq!(classify_phase(0.30), SquatPhase::Bottom);
        assert_eq!(classify_phase(0.599), SquatPhase::Bottom);
        assert_eq!(classify_phase(0.60), SquatPhase::DeepSquat);
        assert_eq!(classify_phase(3.5), SquatPhase::DeepSquat);
        assert_eq!(classify_phase(f64::NAN), SquatPhase::DeepSquat);
    }

    fn leg(hip_y: f64, knee_y: f64) -> JointSet {
        JointSet::new()
            .with(Joint::LeftHip, Point2::new(0.4, hip_y))
            .with(Joint::LeftKnee, Point2::new(0.4, knee_y))
            .with(Joint::LeftAnkle, Point2::new(0.4, 0.9))
    }

    #[test]
    fn test_hip_above_knee() {
        let depth = evaluate_depth(&leg(0.5, 0.7));
        assert!((depth.depth_ratio - 1.0).abs() < 1e-9);
        assert_eq!(depth.phase, SquatPhase::DeepSquat);
        assert!(depth.measured);
    }

    #[test]
    fn test_hip_below_knee_clamps_to_zero() {
        let depth = evaluate_depth(&leg(0.75, 0.7));
        assert_eq!(depth.depth_ratio, 0.0);
        assert_eq!(depth.phase, SquatPhase::Standing);
    }

    #[test]
    fn test_degenerate_thigh() {
        let depth = evaluate_depth(&leg(0.7, 0.7));
        assert_eq!(depth.depth_ratio, 0.0);
        assert_eq!(depth.phase, SquatPhase::Standing);
        assert!(depth.measured);
    }

    #[test]
    fn test_missing_reference_leg() {
        let joints = leg(0.5, 0.7).without(Joint::LeftAnkle);
        let depth = evaluate_depth(&joints);
        assert_eq!(depth, DepthInfo::default());
        assert!(!depth.measured);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(SquatPhase::DeepSquat.to_string(), "deep_squat");
        assert!(SquatPhase::Bottom.is_bottomed());
        assert!(!SquatPhase::Descending.is_bottomed());
    }
}
