//! Rep counting and session statistics.
//!
//! [`SessionTracker`] consumes one analyzed frame at a time and derives
//! everything that depends on frame history: reps, per-rep scores, time spent
//! in each phase and the end-of-session summary.
//!
//! # Rep state machine
//!
//! ```text
//!             leaves standing
//!  ┌──────────┐ ───────────────► ┌────────────┐  reaches bottom  ┌──────────┐
//!  │   idle   │                  │ rep active │ ───────────────► │ bottomed │
//!  └──────────┘ ◄─────────────── └────────────┘                  └──────────┘
//!       ▲        back to standing                                     │
//!       │        (abandoned)                                          │
//!       └─────────────────────────────────────────────────────────────┘
//!                       back to standing → rep completed
//! ```
//!
//! Invalid frames (no pose) are counted but never touch rep or phase state.

// Rep and frame counts convert to f64 for averages
#![allow(clippy::cast_precision_loss)]

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisResult, SquatPhase};
use crate::domain::{FormScore, Timestamp};

/// Success rate below which the session summary recommends slowing down
const FORM_FOCUS_SUCCESS_RATE: f64 = 70.0;

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// A completed repetition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RepSummary {
    /// 1-based rep number within the session
    pub number: u32,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    /// Mean form score over the frames of the rep
    pub score: FormScore,
    pub good: bool,
    pub frames: usize,
}

impl RepSummary {
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        self.finished_at.seconds_since(self.started_at)
    }
}

/// Seconds spent in each phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseDurations {
    pub standing: f64,
    pub descending: f64,
    pub bottom: f64,
    pub deep_squat: f64,
}

impl PhaseDurations {
    #[must_use]
    pub fn get(&self, phase: SquatPhase) -> f64 {
        match phase {
            SquatPhase::Standing => self.standing,
            SquatPhase::Descending => self.descending,
            SquatPhase::Bottom => self.bottom,
            SquatPhase::DeepSquat => self.deep_squat,
        }
    }

    fn add(&mut self, phase: SquatPhase, seconds: f64) {
        let slot = match phase {
            SquatPhase::Standing => &mut self.standing,
            SquatPhase::Descending => &mut self.descending,
            SquatPhase::Bottom => &mut self.bottom,
            SquatPhase::DeepSquat => &mut self.deep_squat,
        };
        *slot += seconds;
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        SquatPhase::ALL.iter().map(|&phase| self.get(phase)).sum()
    }
}

/// End-of-session statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub duration_seconds: f64,
    pub frames_analyzed: usize,
    pub frames_without_pose: usize,
    pub total_reps: u32,
    pub good_reps: u32,
    /// Good reps as a percentage of all reps (0 with no reps)
    pub success_rate: f64,
    pub average_score: Option<f64>,
    pub best_score: Option<f64>,
    pub worst_score: Option<f64>,
    /// `100 − (best − worst)`
    pub consistency: Option<f64>,
    pub average_knee_angle: Option<f64>,
    pub average_back_angle: Option<f64>,
    pub phase_seconds: PhaseDurations,
    pub recommendations: Vec<String>,
}

// =============================================================================
// TRACKER
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct ActiveRep {
    started_at: Timestamp,
    score_sum: f64,
    frames: usize,
    bottomed: bool,
}

/// Frame-by-frame session state
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    first_timestamp: Option<Timestamp>,
    last_timestamp: Option<Timestamp>,
    /// Previous valid frame, for phase timing
    previous: Option<(Timestamp, SquatPhase)>,
    last_phase: SquatPhase,
    active_rep: Option<ActiveRep>,

    frames_analyzed: usize,
    frames_without_pose: usize,
    reps: Vec<RepSummary>,
    knee_history: Vec<f64>,
    back_history: Vec<f64>,
    phase_seconds: PhaseDurations,
}

impl SessionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one analyzed frame
    ///
    /// Returns the rep completed by this frame, if any.
    pub fn record(
        &mut self,
        timestamp: Timestamp,
        result: &AnalysisResult,
        score: FormScore,
    ) -> Option<RepSummary> {
        self.first_timestamp.get_or_insert(timestamp);
        self.last_timestamp = Some(timestamp);
        self.frames_analyzed += 1;

        if !result.valid {
            self.frames_without_pose += 1;
            return None;
        }

        let phase = result.depth.phase;
        if let Some((previous_time, previous_phase)) = self.previous {
            self.phase_seconds.add(previous_phase, timestamp.seconds_since(previous_time));
        }
        self.previous = Some((timestamp, phase));

        let mut completed = None;
        if phase != self.last_phase {
            if self.last_phase == SquatPhase::Standing {
                debug!("Rep started at {timestamp} ({phase})");
                self.active_rep = Some(ActiveRep {
                    started_at: timestamp,
                    score_sum: 0.0,
                    frames: 0,
                    bottomed: false,
                });
            } else if phase == SquatPhase::Standing {
                if let Some(rep) = self.active_rep.take() {
                    if rep.bottomed || self.last_phase.is_bottomed() {
                        completed = Some(self.complete_rep(rep, timestamp));
                    } else {
                        debug!("Rep abandoned at {timestamp} without reaching bottom");
                    }
                }
            }
        }

        if let Some(rep) = self.active_rep.as_mut() {
            rep.score_sum += score.value();
            rep.frames += 1;
            rep.bottomed |= phase.is_bottomed();

            if let Some(knee) = result.knee_angles.mean() {
                self.knee_history.push(knee);
            }
            if let Some(back) = result.back_angle {
                self.back_history.push(back);
            }
        }

        self.last_phase = phase;
        completed
    }

    fn complete_rep(&mut self, rep: ActiveRep, finished_at: Timestamp) -> RepSummary {
        let score = FormScore(rep.score_sum / rep.frames.max(1) as f64);
        let summary = RepSummary {
            number: self.total_reps() + 1,
            started_at: rep.started_at,
            finished_at,
            score,
            good: score.is_good_rep(),
            frames: rep.frames,
        };
        debug!("Rep {} completed: {score}", summary.number);
        self.reps.push(summary);
        summary
    }

    #[must_use]
    pub fn total_reps(&self) -> u32 {
        u32::try_from(self.reps.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn good_reps(&self) -> u32 {
        u32::try_from(self.reps.iter().filter(|rep| rep.good).count()).unwrap_or(u32::MAX)
    }

    /// Good reps as a percentage; 0 before the first rep
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        f64::from(self.good_reps()) / f64::from(self.total_reps().max(1)) * 100.0
    }

    #[must_use]
    pub fn reps(&self) -> &[RepSummary] {
        &self.reps
    }

    /// Current phase as of the last valid frame
    #[must_use]
    pub fn phase(&self) -> SquatPhase {
        self.last_phase
    }

    /// Start time of the rep in progress
    #[must_use]
    pub fn active_rep_started(&self) -> Option<Timestamp> {
        self.active_rep.map(|rep| rep.started_at)
    }

    /// Time since the first frame
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        match (self.first_timestamp, self.last_timestamp) {
            (Some(first), Some(last)) => last.seconds_since(first),
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        let scores: Vec<f64> = self.reps.iter().map(|rep| rep.score.value()).collect();
        let best_score = scores.iter().copied().reduce(f64::max);
        let worst_score = scores.iter().copied().reduce(f64::min);
        let success_rate = self.success_rate();

        SessionSummary {
            duration_seconds: self.elapsed_seconds(),
            frames_analyzed: self.frames_analyzed,
            frames_without_pose: self.frames_without_pose,
            total_reps: self.total_reps(),
            good_reps: self.good_reps(),
            success_rate,
            average_score: mean(&scores),
            best_score,
            worst_score,
            consistency: best_score.zip(worst_score).map(|(best, worst)| 100.0 - (best - worst)),
            average_knee_angle: mean(&self.knee_history),
            average_back_angle: mean(&self.back_history),
            phase_seconds: self.phase_seconds,
            recommendations: recommendations(success_rate),
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn recommendations(success_rate: f64) -> Vec<String> {
    let lines: &[&str] = if success_rate < FORM_FOCUS_SUCCESS_RATE {
        &[
            "Focus on form quality over quantity",
            "Practice slower, controlled movements",
            "Work on mobility and flexibility",
        ]
    } else {
        &[
            "Excellent form! Consider increasing volume",
            "Try adding variations (pause squats, etc.)",
            "Focus on consistent performance",
        ]
    };
    lines.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{DepthInfo, SideAngles};

    fn frame(phase: SquatPhase) -> AnalysisResult {
        AnalysisResult {
            valid: true,
            knee_angles: SideAngles { left: Some(90.0), right: Some(100.0) },
            back_angle: Some(20.0),
            depth: DepthInfo { depth_ratio: 0.0, phase, measured: true },
            ..AnalysisResult::default()
        }
    }

    /// Feed phases at 10 fps, all with the same score
    fn feed(tracker: &mut SessionTracker, phases: &[SquatPhase], score: f64) -> Vec<RepSummary> {
        let start = tracker.frames_analyzed;
        phases
            .iter()
            .enumerate()
            .filter_map(|(i, &phase)| {
                let t = Timestamp((start + i) as f64 * 0.1);
                tracker.record(t, &frame(phase), FormScore(score))
            })
            .collect()
    }

    use SquatPhase::{Bottom, DeepSquat, Descending, Standing};

    #[test]
    fn test_full_rep_is_counted() {
        let mut tracker = SessionTracker::new();
        let reps = feed(&mut tracker, &[Standing, Descending, Bottom, Descending, Standing], 80.0);

        assert_eq!(reps.len(), 1);
        let rep = reps[0];
        assert_eq!(rep.number, 1);
        assert_eq!(rep.frames, 3);
        assert!((rep.score.value() - 80.0).abs() < 1e-9);
        assert!(rep.good);
        assert!((rep.duration_seconds() - 0.3).abs() < 1e-9);
        assert_eq!(tracker.active_rep_started(), None);
        assert_eq!(tracker.reps(), &[rep]);
    }

    #[test]
    fn test_direct_jump_to_deep_squat_counts() {
        let mut tracker = SessionTracker::new();
        let reps = feed(&mut tracker, &[Standing, DeepSquat, DeepSquat, Standing], 50.0);

        assert_eq!(reps.len(), 1);
        assert!(!reps[0].good);
        assert_eq!(tracker.good_reps(), 0);
    }

    #[test]
    fn test_shallow_rep_is_abandoned() {
        let mut tracker = SessionTracker::new();
        let reps = feed(&mut tracker, &[Standing, Descending, Descending, Standing], 90.0);
        assert!(reps.is_empty());
        assert_eq!(tracker.total_reps(), 0);
    }

    #[test]
    fn test_rep_score_is_mean_of_frames() {
        let mut tracker = SessionTracker::new();
        let t = |i: u32| Timestamp(f64::from(i));
        tracker.record(t(0), &frame(Standing), FormScore(0.0));
        tracker.record(t(1), &frame(Descending), FormScore(60.0));
        tracker.record(t(2), &frame(Bottom), FormScore(100.0));
        let rep = tracker.record(t(3), &frame(Standing), FormScore(0.0)).unwrap();

        assert!((rep.score.value() - 80.0).abs() < 1e-9);
        assert!(rep.good);
    }

    #[test]
    fn test_invalid_frames_only_count() {
        let mut tracker = SessionTracker::new();
        feed(&mut tracker, &[Standing, Descending], 80.0);
        tracker.record(Timestamp(5.0), &AnalysisResult::default(), FormScore(0.0));

        let summary = tracker.summary();
        assert_eq!(summary.frames_analyzed, 3);
        assert_eq!(summary.frames_without_pose, 1);
        assert_eq!(tracker.phase(), Descending);
        assert!(tracker.active_rep_started().is_some());
    }

    #[test]
    fn test_phase_time_goes_to_previous_phase() {
        let mut tracker = SessionTracker::new();
        feed(&mut tracker, &[Standing, Standing, Descending, Bottom], 80.0);

        let phases = tracker.summary().phase_seconds;
        assert!((phases.standing - 0.2).abs() < 1e-9);
        assert!((phases.descending - 0.1).abs() < 1e-9);
        assert_eq!(phases.bottom, 0.0);
        assert!((phases.total() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_summary_statistics() {
        let mut tracker = SessionTracker::new();
        feed(&mut tracker, &[Standing, Bottom, Standing], 90.0);
        feed(&mut tracker, &[Bottom, Standing], 60.0);

        let summary = tracker.summary();
        assert_eq!(summary.total_reps, 2);
        assert_eq!(summary.good_reps, 1);
        assert!((summary.success_rate - 50.0).abs() < 1e-9);
        assert!((summary.average_score.unwrap() - 75.0).abs() < 1e-9);
        assert_eq!(summary.best_score, Some(90.0));
        assert_eq!(summary.worst_score, Some(60.0));
        assert!((summary.consistency.unwrap() - 70.0).abs() < 1e-9);
        assert!((summary.average_knee_angle.unwrap() - 95.0).abs() < 1e-9);
        assert!((summary.average_back_angle.unwrap() - 20.0).abs() < 1e-9);
        assert_eq!(summary.recommendations[0], "Focus on form quality over quantity");
        assert!((summary.duration_seconds - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_empty_session() {
        let summary = SessionTracker::new().summary();
        assert_eq!(summary.total_reps, 0);
        assert_eq!(summary.success_rate, 0.0);
        assert_eq!(summary.average_score, None);
        assert_eq!(summary.consistency, None);
        assert_eq!(summary.duration_seconds, 0.0);
    }

    #[test]
    fn test_good_session_recommendations() {
        let mut tracker = SessionTracker::new();
        feed(&mut tracker, &[Standing, DeepSquat, Standing], 95.0);
        assert!(tracker.summary().recommendations[0].starts_with("Excellent form"));
    }
}
