//! Console output
//!
//! `*_lines` functions build the text; `display_*` functions print it. The
//! split keeps the wording testable.

use crate::analysis::AnalysisResult;
use crate::config::AnalyzerConfig;
use crate::domain::{FormScore, FrameId, Timestamp};
use crate::export::{ProgressDelta, SessionRecord};
use crate::session::{RepSummary, SessionSummary, SessionTracker};

/// Feedback lines shown per frame before the score line
const OVERLAY_FEEDBACK_LINES: usize = 4;

const RULE_WIDTH: usize = 60;

/// Startup banner: active analysis parameters and the previous session, if any
#[must_use]
pub fn session_start_lines(config: &AnalyzerConfig, last: Option<&SessionRecord>) -> Vec<String> {
    let knee = config.knee_ideal_range;
    let back = config.back_ideal_range;
    let mut lines = vec![
        "📊 Analysis Parameters:".to_string(),
        format!("   • Ideal knee angle: {:.0}°-{:.0}°", knee.min, knee.max),
        format!("   • Ideal back angle: {:.0}°-{:.0}°", back.min, back.max),
        format!("   • Angle tolerance: ±{:.0}°", config.angle_tolerance),
        format!("   • Balance tolerance: {:.2}", config.balance_tolerance),
    ];

    if let Some(last) = last {
        lines.push(format!(
            "📈 Last Session: {} squats, {:.1}% success",
            last.total_squats, last.success_rate
        ));
    }
    lines
}

pub fn display_session_start(config: &AnalyzerConfig, last: Option<&SessionRecord>) {
    for line in session_start_lines(config, last) {
        println!("{line}");
    }
}

/// Live status block for one frame: feedback, score, rep timer and session counters
#[must_use]
pub fn overlay_lines(
    result: &AnalysisResult,
    score: FormScore,
    tracker: &SessionTracker,
    now: Timestamp,
) -> Vec<String> {
    let mut lines = vec!["🏋️ SQUAT FORM CHECK".to_string()];

    if result.valid {
        lines.extend(result.feedback_lines().into_iter().take(OVERLAY_FEEDBACK_LINES));
        lines.push(format!("{} Form Score: {score}", score.grade().icon()));
        if let Some(started) = tracker.active_rep_started() {
            lines.push(format!("⏱️  Rep Time: {:.1}s", now.seconds_since(started)));
        }
    } else {
        lines.push("❌ No pose detected - Step into view".to_string());
    }

    lines.push(String::new());
    lines.push(format!("📊 Reps: {}", tracker.total_reps()));
    lines.push(format!("✅ Good: {}", tracker.good_reps()));
    lines.push(format!("📈 Success: {:.1}%", tracker.success_rate()));
    lines
}

#[must_use]
pub fn frame_header(id: FrameId, timestamp: Timestamp, result: &AnalysisResult) -> String {
    if result.valid {
        let depth = &result.depth;
        format!("[{id} {timestamp}] phase={} depth={:.2}", depth.phase, depth.depth_ratio)
    } else {
        format!("[{id} {timestamp}] no pose")
    }
}

pub fn display_frame(id: FrameId, timestamp: Timestamp, result: &AnalysisResult, lines: &[String]) {
    println!("\n{}", frame_header(id, timestamp, result));
    for line in lines {
        println!("  {line}");
    }
}

#[must_use]
pub fn rep_line(rep: &RepSummary) -> String {
    let verdict = if rep.good { "good" } else { "needs work" };
    format!(
        "[REP {}] {} ({verdict}) in {:.1}s",
        rep.number,
        rep.score,
        rep.duration_seconds()
    )
}

pub fn display_rep(rep: &RepSummary) {
    println!("{}", rep_line(rep));
}

/// End-of-session report
#[must_use]
pub fn summary_lines(summary: &SessionSummary, delta: Option<&ProgressDelta>) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "🏆 TRAINING SESSION SUMMARY".to_string(),
        rule.clone(),
        format!("⏱️  Duration: {:.1} minutes", summary.duration_seconds / 60.0),
        format!(
            "🎞️  Frames: {} ({} without pose)",
            summary.frames_analyzed, summary.frames_without_pose
        ),
        format!("📊 Total Squats: {}", summary.total_reps),
        format!("✅ Good Reps: {}", summary.good_reps),
        format!("📈 Success Rate: {:.1}%", summary.success_rate),
    ];

    if let (Some(average), Some(best), Some(worst), Some(consistency)) = (
        summary.average_score,
        summary.best_score,
        summary.worst_score,
        summary.consistency,
    ) {
        lines.push(String::new());
        lines.push("🎯 FORM ANALYSIS:".to_string());
        lines.push(format!("   Average Score: {average:.1}/100"));
        lines.push(format!("   Best Score: {best:.1}/100"));
        lines.push(format!("   Worst Score: {worst:.1}/100"));
        lines.push(format!("   Score Consistency: {consistency:.1}%"));
    }

    if let Some(knee) = summary.average_knee_angle {
        lines.push(String::new());
        lines.push("📐 ANGLE ANALYSIS:".to_string());
        lines.push(format!("   Avg Knee Angle: {knee:.1}°"));
        if let Some(back) = summary.average_back_angle {
            lines.push(format!("   Avg Back Angle: {back:.1}°"));
        }
    }

    if let Some(delta) = delta {
        lines.push(String::new());
        lines.push("📊 PROGRESS vs LAST SESSION:".to_string());
        lines.push(format!(
            "   Reps: {:+} ({} vs {})",
            delta.rep_change(),
            delta.current.total_squats,
            delta.previous.total_squats
        ));
        lines.push(format!(
            "   Success Rate: {:+.1}% ({:.1}% vs {:.1}%)",
            delta.success_rate_change(),
            delta.current.success_rate,
            delta.previous.success_rate
        ));
    }

    lines.push(String::new());
    lines.push("💡 RECOMMENDATIONS:".to_string());
    lines.extend(summary.recommendations.iter().map(|r| format!("   • {r}")));
    lines.push(rule);
    lines
}

pub fn display_summary(summary: &SessionSummary, delta: Option<&ProgressDelta>) {
    for line in summary_lines(summary, delta) {
        println!("{line}");
    }
}
