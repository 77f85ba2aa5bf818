//! Joint angle analyses (knee, hip, back)
//!
//! Each analysis reads only the joints it needs and reports nothing for a
//! side whose joints are missing.

use formcheck_common::{Joint, Side};
use serde::Serialize;

use crate::geometry::{calculate_angle, lean_from_vertical, midpoint};
use crate::landmarks::JointSet;

/// One angle measurement per body side, absent where joints are missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SideAngles {
    pub left: Option<f64>,
    pub right: Option<f64>,
}

impl SideAngles {
    #[must_use]
    pub fn get(&self, side: Side) -> Option<f64> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Present measurements, left side first
    pub fn iter(&self) -> impl Iterator<Item = (Side, f64)> + '_ {
        Side::BOTH.into_iter().filter_map(|side| self.get(side).map(|angle| (side, angle)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Mean of the present measurements
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        match (self.left, self.right) {
            (Some(l), Some(r)) => Some((l + r) / 2.0),
            (Some(a), None) | (None, Some(a)) => Some(a),
            (None, None) => None,
        }
    }

    fn measure(joints: &JointSet, vertex_triplet: impl Fn(Side) -> (Joint, Joint, Joint)) -> Self {
        let angle_for = |side| {
            let (a, vertex, b) = vertex_triplet(side);
            joints.triplet(a, vertex, b).map(|(a, v, b)| calculate_angle(a, v, b))
        };
        Self { left: angle_for(Side::Left), right: angle_for(Side::Right) }
    }
}

/// Knee angle per side: vertex at the knee, between hip and ankle
#[must_use]
pub fn knee_angles(joints: &JointSet) -> SideAngles {
    SideAngles::measure(joints, |side| (Joint::hip(side), Joint::knee(side), Joint::ankle(side)))
}

/// Hip angle per side: vertex at the hip, between shoulder and knee
#[must_use]
pub fn hip_angles(joints: &JointSet) -> SideAngles {
    SideAngles::measure(joints, |side| (Joint::shoulder(side), Joint::hip(side), Joint::knee(side)))
}

/// Torso lean from vertical in degrees
///
/// Measured on the segment from the hip midpoint to the shoulder midpoint.
/// Needs both shoulders and both hips; `None` otherwise. A perfectly upright
/// torso reports `Some(0.0)`, which is distinct from "not measurable".
#[must_use]
pub fn back_angle(joints: &JointSet) -> Option<f64> {
    let shoulders = midpoint(joints.get(Joint::LeftShoulder)?, joints.get(Joint::RightShoulder)?);
    let hips = midpoint(joints.get(Joint::LeftHip)?, joints.get(Joint::RightHip)?);
    Some(lean_from_vertical(hips, shoulders))
}
