//! Squat form analysis for a single frame.
//!
//! [`FormAnalyzer`] turns one [`LandmarkFrame`] into an [`AnalysisResult`]:
//! joint angles, torso lean, balance, depth/phase and the feedback list.
//!
//! # Data Flow
//!
//! ```text
//! LandmarkFrame
//!     │
//!     ├── NoPose ──────────────────────────► invalid result ("No pose detected")
//!     │
//!     └── Pose(JointSet)
//!             ├── knee_angles / hip_angles   (angles.rs)
//!             ├── back_angle                 (angles.rs)
//!             ├── analyze_balance            (balance.rs)
//!             ├── evaluate_depth             (depth.rs)
//!             └── generate_feedback          (feedback.rs)
//! ```
//!
//! The analyzer holds only its configuration. Every call builds a fresh result,
//! so one analyzer can be shared across threads.

use serde::Serialize;

use super::angles::{back_angle, hip_angles, knee_angles, SideAngles};
use super::balance::{analyze_balance, BalanceMetrics};
use super::depth::{evaluate_depth, DepthInfo};
use super::feedback::{generate_feedback, Feedback, FeedbackInput, FeedbackKind};
use super::score::form_score;
use crate::config::AnalyzerConfig;
use crate::domain::FormScore;
use crate::landmarks::{JointSet, LandmarkFrame};

/// Message for a frame in which the detector found nobody
pub const NO_POSE_MESSAGE: &str = "No pose detected";

/// Message for a pose whose landmark set contained none of the tracked joints
pub const NO_JOINTS_MESSAGE: &str = "Unable to detect key joints";

/// Everything the analyzer learned from one frame
///
/// When `valid` is false only `feedback` carries information (a single
/// explanatory line); every measurement is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub valid: bool,
    pub knee_angles: SideAngles,
    pub hip_angles: SideAngles,
    /// Torso lean from vertical; `None` when shoulders or hips are missing
    pub back_angle: Option<f64>,
    pub balance: BalanceMetrics,
    pub depth: DepthInfo,
    pub feedback: Vec<Feedback>,
    pub joints: JointSet,
}

impl AnalysisResult {
    fn invalid(message: &str) -> Self {
        Self {
            feedback: vec![Feedback { kind: FeedbackKind::Warning, text: message.to_string() }],
            ..Self::default()
        }
    }

    /// Feedback rendered as display lines (icon + text)
    #[must_use]
    pub fn feedback_lines(&self) -> Vec<String> {
        self.feedback.iter().map(ToString::to_string).collect()
    }
}

/// Stateless squat form analyzer
#[derive(Debug, Clone, Default)]
pub struct FormAnalyzer {
    config: AnalyzerConfig,
}

impl FormAnalyzer {
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one frame from the Landmark Source
    #[must_use]
    pub fn analyze(&self, frame: &LandmarkFrame) -> AnalysisResult {
        match frame {
            LandmarkFrame::NoPose => AnalysisResult::invalid(NO_POSE_MESSAGE),
            LandmarkFrame::Pose(joints) => self.analyze_joints(joints),
        }
    }

    /// Analyze an already-extracted joint set
    #[must_use]
    pub fn analyze_joints(&self, joints: &JointSet) -> AnalysisResult {
        if joints.is_empty() {
            return AnalysisResult::invalid(NO_JOINTS_MESSAGE);
        }

        let knee_angles = knee_angles(joints);
        let hip_angles = hip_angles(joints);
        let back_angle = back_angle(joints);
        let balance = analyze_balance(joints);
        let depth = evaluate_depth(joints);

        let feedback = generate_feedback(
            &FeedbackInput {
                knee_angles: &knee_angles,
                back_angle,
                balance: &balance,
                phase: depth.phase,
            },
            &self.config,
        );

        AnalysisResult {
            valid: true,
            knee_angles,
            hip_angles,
            back_angle,
            balance,
            depth,
            feedback,
            joints: *joints,
        }
    }

    /// Form score of a result under this analyzer's configuration
    #[must_use]
    pub fn score(&self, result: &AnalysisResult) -> FormScore {
        form_score(result, &self.config)
    }
}
