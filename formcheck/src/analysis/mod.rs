//! Squat form analysis engine
//!
//! This module contains the pure analysis logic: geometry-derived measurements,
//! phase classification, feedback rules and scoring. Nothing in here performs
//! I/O or keeps state between frames.

pub mod angles;
pub mod balance;
pub mod depth;
pub mod feedback;
pub mod form_analyzer;
pub mod score;

pub use angles::{back_angle, hip_angles, knee_angles, SideAngles};
pub use balance::{analyze_balance, BalanceMetrics};
pub use depth::{classify_phase, evaluate_depth, DepthInfo, SquatPhase};
pub use feedback::{generate_feedback, Feedback, FeedbackInput, FeedbackKind};
pub use form_analyzer::{AnalysisResult, FormAnalyzer, NO_JOINTS_MESSAGE, NO_POSE_MESSAGE};
pub use score::form_score;
