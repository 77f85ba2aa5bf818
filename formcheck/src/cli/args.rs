//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::export::DEFAULT_PROGRESS_FILE;

/// Highest accepted `--fps`; anything faster is indistinguishable from unpaced
pub const MAX_FPS: f64 = 1000.0;

/// Accepts a finite rate in `0..=MAX_FPS`
fn parse_fps(s: &str) -> Result<f64, String> {
    let fps: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !fps.is_finite() || !(0.0..=MAX_FPS).contains(&fps) {
        return Err(format!("must be a number between 0 and {MAX_FPS}"));
    }
    Ok(fps)
}

#[derive(Parser, Debug)]
#[command(
    name = "formcheck",
    about = "Analyze squat form from pose landmark streams",
    after_help = "\
EXAMPLES:
    formcheck --simulate                          Demo squatter, 5 reps
    formcheck --recording session.jsonl           Replay a landmark recording
    formcheck --recording s.jsonl --fps 0 --quiet Replay as fast as possible
    formcheck --simulate --export frames.json     Dump every analyzed frame"
)]
pub struct Args {
    /// Replay a JSON-lines landmark recording
    #[arg(short, long, value_name = "FILE", conflicts_with = "simulate")]
    pub recording: Option<PathBuf>,

    /// Use the built-in simulated squatter
    #[arg(short, long)]
    pub simulate: bool,

    /// Analyzer thresholds (JSON); defaults are used when omitted
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Stop after N frames (simulated source defaults to 5 reps)
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Playback rate in frames per second (0 = as fast as possible)
    #[arg(long, default_value = "30", value_parser = parse_fps)]
    pub fps: f64,

    /// Export every analyzed frame plus the session summary to a JSON file
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Progress log to append the session to
    #[arg(long, value_name = "FILE", default_value = DEFAULT_PROGRESS_FILE)]
    pub progress: PathBuf,

    /// Do not read or write the progress log
    #[arg(long)]
    pub no_progress: bool,

    /// Print the status block every N frames (0 = never)
    #[arg(long, value_name = "N", default_value = "30")]
    pub every: u64,

    /// Suppress per-frame and per-rep output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["formcheck", "--simulate"]).unwrap();
        assert!(args.simulate);
        assert_eq!(args.fps, 30.0);
        assert_eq!(args.every, 30);
        assert_eq!(args.progress, PathBuf::from(DEFAULT_PROGRESS_FILE));
        assert!(!args.no_progress);
    }

    #[test]
    fn test_recording_conflicts_with_simulate() {
        let args = ["formcheck", "--simulate", "--recording", "a.jsonl"];
        assert!(Args::try_parse_from(args).is_err());
    }

    #[test]
    fn test_fps_rejects_unpaceable_rates() {
        for fps in ["inf", "NaN", "1e12", "-1", "fast"] {
            let parsed = Args::try_parse_from(["formcheck", "--simulate", "--fps", fps]);
            assert!(parsed.is_err(), "--fps {fps} should be rejected");
        }
    }

    #[test]
    fn test_fps_accepts_zero_and_ceiling() {
        let args = Args::try_parse_from(["formcheck", "--simulate", "--fps", "0"]).unwrap();
        assert_eq!(args.fps, 0.0);
        let args = Args::try_parse_from(["formcheck", "--simulate", "--fps", "1000"]).unwrap();
        assert_eq!(args.fps, MAX_FPS);
    }
}
