//! Session state built on top of per-frame analysis
//!
//! The analysis engine is stateless; everything that depends on the history of
//! frames (rep counting, phase timing, session summary) lives here and is owned
//! by the caller driving the frame loop.

pub mod tracker;

pub use tracker::{PhaseDurations, RepSummary, SessionSummary, SessionTracker};
