//! Balance analysis from horizontal joint positions

use formcheck_common::Joint;
use serde::Serialize;

use crate::landmarks::JointSet;

/// Horizontal balance metrics, normalized units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BalanceMetrics {
    /// |left ankle x − right ankle x|
    pub foot_symmetry: Option<f64>,
    /// |hip midpoint x − ankle midpoint x|
    pub center_alignment: Option<f64>,
}

impl BalanceMetrics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foot_symmetry.is_none() && self.center_alignment.is_none()
    }
}

/// Compute whichever balance metrics the joint set supports
#[must_use]
pub fn analyze_balance(joints: &JointSet) -> BalanceMetrics {
    let ankles = joints.get(Joint::LeftAnkle).zip(joints.get(Joint::RightAnkle));
    let hips = joints.get(Joint::LeftHip).zip(joints.get(Joint::RightHip));

    let foot_symmetry = ankles.map(|(left, right)| (left.x - right.x).abs());
    let center_alignment = ankles.zip(hips).map(|((la, ra), (lh, rh))| {
        let ankle_center_x = (la.x + ra.x) / 2.0;
        let hip_center_x = (lh.x + rh.x) / 2.0;
        (hip_center_x - ankle_center_x).abs()
    });

    BalanceMetrics { foot_symmetry, center_alignment }
}
