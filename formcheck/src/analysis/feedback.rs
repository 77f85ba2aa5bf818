//! Coaching feedback rules
//!
//! Rules run in a fixed order so identical input and configuration always
//! produce the same list:
//!
//! 1. Knee angle, left then right (too bent / not bent enough / good)
//! 2. Back angle (too far forward / too upright / good)
//! 3. Balance (centered / not centered)
//! 4. One coaching line for the current phase
//!
//! A rule whose measurement is absent emits nothing.

use formcheck_common::Side;
use serde::Serialize;
use std::fmt;

use super::angles::SideAngles;
use super::balance::BalanceMetrics;
use super::depth::SquatPhase;
use crate::config::AnalyzerConfig;

/// Tone of a feedback line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    /// Form is within range
    Good,
    /// Form needs correcting
    Warning,
    /// Neutral cue for the current phase
    Tip,
}

impl FeedbackKind {
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            FeedbackKind::Good => "✅",
            FeedbackKind::Warning => "❌",
            FeedbackKind::Tip => "💡",
        }
    }
}

/// A single feedback line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

impl Feedback {
    fn good(text: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Good, text: text.into() }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Warning, text: text.into() }
    }

    fn tip(text: impl Into<String>) -> Self {
        Self { kind: FeedbackKind::Tip, text: text.into() }
    }

    #[must_use]
    pub fn is_good(&self) -> bool {
        self.kind == FeedbackKind::Good
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.icon(), self.text)
    }
}

/// Measurements the rules look at
#[derive(Debug, Clone, Copy)]
pub struct FeedbackInput<'a> {
    pub knee_angles: &'a SideAngles,
    pub back_angle: Option<f64>,
    pub balance: &'a BalanceMetrics,
    pub phase: SquatPhase,
}

/// Run every rule in order and collect the resulting lines
#[must_use]
pub fn generate_feedback(input: &FeedbackInput<'_>, config: &AnalyzerConfig) -> Vec<Feedback> {
    let mut feedback = Vec::with_capacity(5);

    for (side, angle) in input.knee_angles.iter() {
        feedback.push(knee_feedback(side, angle, config));
    }

    if let Some(angle) = input.back_angle {
        feedback.push(back_feedback(angle, config));
    }

    if let Some(alignment) = input.balance.center_alignment {
        feedback.push(balance_feedback(alignment, config));
    }

    feedback.push(phase_feedback(input.phase));
    feedback
}

fn knee_feedback(side: Side, angle: f64, config: &AnalyzerConfig) -> Feedback {
    let range = config.knee_ideal_range;
    let tolerance = config.angle_tolerance;
    let label = side.label();

    if angle < range.min - tolerance {
        Feedback::warning(format!("{label} Knee: Too bent ({angle:.1}°) - Don't go too low"))
    } else if angle > range.max + tolerance {
        Feedback::warning(format!("{label} Knee: Not bent enough ({angle:.1}°) - Go deeper"))
    } else {
        Feedback::good(format!("{label} Knee: Good angle ({angle:.1}°)"))
    }
}

fn back_feedback(angle: f64, config: &AnalyzerConfig) -> Feedback {
    let range = config.back_ideal_range;
    let tolerance = config.angle_tolerance;

    if angle > range.max + tolerance {
        Feedback::warning(format!("Back: Leaning too forward ({angle:.1}°) - Keep chest up"))
    } else if angle < range.min - tolerance {
        Feedback::warning(format!("Back: Too upright ({angle:.1}°) - Slight forward lean is OK"))
    } else {
        Feedback::good(format!("Back: Good posture ({angle:.1}°)"))
    }
}

fn balance_feedback(center_alignment: f64, config: &AnalyzerConfig) -> Feedback {
    if center_alignment > config.balance_tolerance {
        Feedback::warning("Balance: Weight not centered - Shift weight to center")
    } else {
        Feedback::good("Balance: Good weight distribution")
    }
}

fn phase_feedback(phase: SquatPhase) -> Feedback {
    match phase {
        SquatPhase::Standing => Feedback::tip("Ready to squat - Begin descent"),
        SquatPhase::Descending => Feedback::tip("Descending - Keep going deeper"),
        SquatPhase::Bottom => Feedback::good("Good depth - Hold briefly then push up"),
        SquatPhase::DeepSquat => Feedback::good("Excellent depth - Drive through heels to stand"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(
        knees: SideAngles,
        back: Option<f64>,
        alignment: Option<f64>,
        phase: SquatPhase,
    ) -> Vec<Feedback> {
        let balance = BalanceMetrics { foot_symmetry: None, center_alignment: alignment };
        let input =
            FeedbackInput { knee_angles: &knees, back_angle: back, balance: &balance, phase };
        generate_feedback(&input, &AnalyzerConfig::default())
    }

    #[test]
    fn test_knee_three_way() {
        let knees = SideAngles { left: Some(60.0), right: Some(180.0) };
        let feedback = run(knees, None, None, SquatPhase::Standing);

        assert_eq!(feedback[0].text, "Left Knee: Too bent (60.0°) - Don't go too low");
        assert_eq!(feedback[0].kind, FeedbackKind::Warning);
        assert_eq!(feedback[1].text, "Right Knee: Not bent enough (180.0°) - Go deeper");

        let knees = SideAngles { left: Some(70.0), right: Some(110.0) };
        let feedback = run(knees, None, None, SquatPhase::Standing);
        assert!(feedback[0].is_good(), "70° sits on the tolerance edge");
        assert!(feedback[1].is_good(), "110° sits on the tolerance edge");
    }

    #[test]
    fn test_back_three_way() {
        let none = SideAngles::default();
        let forward = run(none, Some(45.0), None, SquatPhase::Bottom);
        assert!(forward[0].text.starts_with("Back: Leaning too forward"));
        let upright = run(none, Some(2.0), None, SquatPhase::Bottom);
        assert!(upright[0].text.starts_with("Back: Too upright"));
        assert!(run(none, Some(20.0), None, SquatPhase::Bottom)[0].is_good());
    }

    #[test]
    fn test_balance_binary() {
        let none = SideAngles::default();
        let off = run(none, None, Some(0.15), SquatPhase::Standing);
        assert_eq!(off[0].text, "Balance: Weight not centered - Shift weight to center");

        let centered = run(none, None, Some(0.1), SquatPhase::Standing);
        assert!(centered[0].is_good());
    }

    #[test]
    fn test_fixed_order_and_phase_last() {
        let knees = SideAngles { left: Some(90.0), right: Some(92.0) };
        let feedback = run(knees, Some(20.0), Some(0.02), SquatPhase::DeepSquat);

        assert_eq!(feedback.len(), 5);
        assert!(feedback[0].text.starts_with("Left Knee"));
        assert!(feedback[1].text.starts_with("Right Knee"));
        assert!(feedback[2].text.starts_with("Back"));
        assert!(feedback[3].text.starts_with("Balance"));
        assert_eq!(feedback[4].text, "Excellent depth - Drive through heels to stand");
    }

    #[test]
    fn test_absent_measurements_emit_only_phase() {
        let feedback = run(SideAngles::default(), None, None, SquatPhase::Descending);
        assert_eq!(feedback.len(), 1);
        assert_eq!(feedback[0].kind, FeedbackKind::Tip);
    }

    #[test]
    fn test_display_has_icon() {
        let line = phase_feedback(SquatPhase::Bottom).to_string();
        assert_eq!(line, "✅ Good depth - Hold briefly then push up");
    }
}
