//! # formcheck - Squat Form Analysis
//!
//! formcheck turns per-frame body landmarks (normalized 2-D joint positions
//! from a pose detector) into squat form feedback: joint angles, torso lean,
//! balance, squat depth and phase, coaching messages and a 0-100 form score.
//! On top of the stateless engine it counts reps, tracks a training session
//! and keeps a progress history across sessions.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Landmark Source                          │
//! │   recording (JSON lines)  │  simulated squatter              │
//! └───────────────────────────┬──────────────────────────────────┘
//!                             │ LandmarkFrame (NoPose | JointSet)
//!                             ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  Analysis Engine (stateless)                 │
//! │  angles ─ balance ─ depth/phase ─ feedback ─ form score      │
//! └───────────────────────────┬──────────────────────────────────┘
//!                             │ AnalysisResult + FormScore
//!                             ▼
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │   Session    │──▶│     Report       │   │     Export       │
//! │   Tracker    │   │    (console)     │   │ progress / frames│
//! └──────────────┘   └──────────────────┘   └──────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`geometry`]: planar angle and lean primitives
//! - [`landmarks`]: [`landmarks::JointSet`] and the MediaPipe index adapter
//! - [`config`]: ideal ranges and tolerances ([`config::AnalyzerConfig`])
//! - [`analysis`]: per-frame measurements, feedback rules and scoring
//! - [`session`]: rep counting and session statistics
//! - [`source`]: landmark sources (recordings, simulation)
//! - [`export`]: progress log and per-frame JSON export
//! - [`report`]: console output
//! - [`cli`]: command-line arguments
//! - [`domain`]: newtypes and error enums
//!
//! ## Coordinates
//!
//! Landmarks are normalized image coordinates: `x` grows to the right, `y`
//! grows downward, both nominally in `[0, 1]`. Every analysis tolerates
//! missing joints and simply reports less.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod geometry;
pub mod landmarks;
pub mod report;
pub mod session;
pub mod source;
