//! # formcheck - Main Entry Point
//!
//! Pulls frames from a landmark source, analyzes each one, tracks reps and
//! prints a session summary at the end:
//! - **Recording** (`--recording FILE`): replay a JSON-lines landmark stream
//! - **Simulation** (`--simulate`): built-in squatting figure

// Main loop is intentionally long for clarity
#![allow(clippy::too_many_lines)]

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use formcheck::analysis::FormAnalyzer;
use formcheck::cli::Args;
use formcheck::config::AnalyzerConfig;
use formcheck::export::{FrameExporter, ProgressLog, SessionRecord};
use formcheck::report::{
    display_frame, display_rep, display_session_start, display_summary, overlay_lines,
};
use formcheck::session::SessionTracker;
use formcheck::source::{LandmarkSource, RecordingSource, SimulatedSquat};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

/// Reps the simulated squatter performs when `--frames` is not given
const DEFAULT_SIMULATED_REPS: u32 = 5;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.to_string().to_lowercase().contains("missing required argument") {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

fn open_source(args: &Args) -> Result<Box<dyn LandmarkSource>> {
    if let Some(ref path) = args.recording {
        let source = RecordingSource::open(path)?.with_fps(args.fps);
        return Ok(Box::new(source));
    }

    if args.simulate {
        let mut source = SimulatedSquat::new(args.fps);
        if args.frames.is_none() {
            source = source.with_reps(DEFAULT_SIMULATED_REPS);
        }
        return Ok(Box::new(source));
    }

    anyhow::bail!(
        "Missing required argument: --recording FILE or --simulate\n\n\
         Usage:\n  \
         formcheck --recording session.jsonl   Replay a landmark recording\n  \
         formcheck --simulate                  Built-in demo squatter\n\n\
         Run 'formcheck --help' for more options"
    )
}

/// Tick period for `fps`, or `None` when the rate leaves nothing to wait for
fn frame_period(fps: f64) -> Option<Duration> {
    if fps <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(fps.recip())
        .ok()
        .filter(|period| !period.is_zero())
}

#[tokio::main]
async fn run() -> Result<()> {
    let args = Args::parse();
    let quiet = args.quiet;

    let config = match args.config {
        Some(ref path) => AnalyzerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    let analyzer = FormAnalyzer::new(config);

    let mut source = open_source(&args)?;
    info!("Reading frames from {} source", source.name());

    let mut progress = if args.no_progress {
        None
    } else {
        Some(ProgressLog::load(&args.progress).context("Failed to read progress log")?)
    };

    if !quiet {
        println!("formcheck v{}", env!("CARGO_PKG_VERSION"));
        display_session_start(analyzer.config(), progress.as_ref().and_then(ProgressLog::last));
    }

    let mut tracker = SessionTracker::new();
    let mut exporter = args.export.as_ref().map(|_| FrameExporter::new());

    // Frame pacing; fps == 0 runs as fast as frames can be read
    let mut pacing = frame_period(args.fps).map(|period| {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut frames_processed: u64 = 0;
    let mut exit_reason = "end of stream";

    loop {
        if args.frames.is_some_and(|limit| frames_processed >= limit) {
            exit_reason = "frame limit reached";
            break;
        }

        if let Some(interval) = pacing.as_mut() {
            tokio::select! {
                _ = interval.tick() => {}
                _ = &mut ctrl_c => {
                    exit_reason = "interrupted";
                    break;
                }
            }
        } else {
            tokio::select! {
                biased;
                _ = &mut ctrl_c => {
                    exit_reason = "interrupted";
                    break;
                }
                () = tokio::task::yield_now() => {}
            }
        }

        let Some(frame) = source.next_frame().context("Failed to read frame")? else {
            break;
        };
        frames_processed += 1;

        let result = analyzer.analyze(&frame.frame);
        let score = analyzer.score(&result);
        let completed_rep = tracker.record(frame.timestamp, &result, score);

        if let Some(exporter) = exporter.as_mut() {
            exporter.record(frame.id, frame.timestamp, score, &result);
        }

        if !quiet {
            if let Some(rep) = completed_rep {
                display_rep(&rep);
            }
            if args.every > 0 && frame.id.0 % args.every == 0 {
                let lines = overlay_lines(&result, score, &tracker, frame.timestamp);
                display_frame(frame.id, frame.timestamp, &result, &lines);
            }
        }
    }

    let summary = tracker.summary();
    eprintln!("\n{exit_reason}: {frames_processed} frames, {} reps", summary.total_reps);

    let mut delta = None;
    let mut progress_saved = false;
    if let Some(ref mut log) = progress {
        log.append(SessionRecord::from_summary(&summary));
        match log.save(&args.progress) {
            Ok(()) => {
                progress_saved = true;
                delta = log.compare_last_two();
            }
            Err(e) => warn!("Progress not saved: {e}"),
        }
    }

    display_summary(&summary, delta.as_ref());

    if progress_saved && !quiet {
        println!("📁 Progress saved to: {}", args.progress.display());
    }

    if let (Some(exporter), Some(export_path)) = (exporter, args.export.as_ref()) {
        let file = File::create(export_path).context("Failed to create export file")?;
        let writer = BufWriter::new(file);
        exporter.export(writer, &summary).context("Failed to export frames")?;

        if !quiet {
            println!("saved: {}", export_path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_period() {
        assert_eq!(frame_period(0.0), None);
        assert_eq!(frame_period(20.0), Some(Duration::from_millis(50)));
        // Too fast to represent: run unpaced instead of a zero-length interval
        assert_eq!(frame_period(1e12), None);
        assert_eq!(frame_period(f64::INFINITY), None);
    }
}
