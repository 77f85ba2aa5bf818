//! Form score (0-100)
//!
//! Every aspect that could be measured in the frame earns points:
//!
//! | Aspect            | Ideal (25)                  | Acceptable (15)                 |
//! |-------------------|-----------------------------|---------------------------------|
//! | Knee, per side    | inside `knee_ideal_range`   | inside range ± `angle_tolerance`|
//! | Back angle        | inside `back_ideal_range`   | inside range ± `angle_tolerance`|
//! | Balance           | alignment ≤ tolerance       | alignment ≤ 2 × tolerance       |
//! | Depth             | bottom or deep squat        | descending                      |
//!
//! The score is the mean over the measured aspects, rescaled so that an
//! all-ideal frame scores 100. Missing joints shrink the denominator instead of
//! counting as failures.

// Aspect counts are tiny; the usize -> f64 conversion is exact
#![allow(clippy::cast_precision_loss)]

use super::depth::SquatPhase;
use super::form_analyzer::AnalysisResult;
use crate::config::{AnalyzerConfig, IdealRange};
use crate::domain::FormScore;

/// Points for an aspect inside its strict ideal range
const IDEAL_POINTS: f64 = 25.0;

/// Points for an aspect outside the ideal range but within tolerance
const TOLERANCE_POINTS: f64 = 15.0;

fn angle_points(angle: f64, range: IdealRange, tolerance: f64) -> f64 {
    if range.contains(angle) {
        IDEAL_POINTS
    } else if range.contains_with_tolerance(angle, tolerance) {
        TOLERANCE_POINTS
    } else {
        0.0
    }
}

fn balance_points(center_alignment: f64, tolerance: f64) -> f64 {
    if center_alignment <= tolerance {
        IDEAL_POINTS
    } else if center_alignment <= tolerance * 2.0 {
        TOLERANCE_POINTS
    } else {
        0.0
    }
}

fn depth_points(phase: SquatPhase) -> f64 {
    match phase {
        SquatPhase::Bottom | SquatPhase::DeepSquat => IDEAL_POINTS,
        SquatPhase::Descending => TOLERANCE_POINTS,
        SquatPhase::Standing => 0.0,
    }
}

/// Score an analysis result against the configuration
///
/// Invalid results and results with no measurable aspect score 0.
#[must_use]
pub fn form_score(result: &AnalysisResult, config: &AnalyzerConfig) -> FormScore {
    if !result.valid {
        return FormScore(0.0);
    }

    let mut points: Vec<f64> = Vec::with_capacity(5);

    for (_, angle) in result.knee_angles.iter() {
        points.push(angle_points(angle, config.knee_ideal_range, config.angle_tolerance));
    }

    if let Some(angle) = result.back_angle {
        points.push(angle_points(angle, config.back_ideal_range, config.angle_tolerance));
    }

    if let Some(alignment) = result.balance.center_alignment {
        points.push(balance_points(alignment, config.balance_tolerance));
    }

    if result.depth.measured {
        points.push(depth_points(result.depth.phase));
    }

    if points.is_empty() {
        return FormScore(0.0);
    }

    let mean = points.iter().sum::<f64>() / points.len() as f64;
    FormScore((mean / IDEAL_POINTS * 100.0).min(100.0))
}
