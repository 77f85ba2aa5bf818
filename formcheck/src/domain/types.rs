//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep frame counters, timestamps and scores from
//! being mixed up with the raw `f64` geometry flowing through the analyzer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame number within a landmark stream (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameId(pub u64);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame#{}", self.0)
    }
}

/// Frame timestamp in seconds since the start of the stream
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Timestamp(pub f64);

impl Timestamp {
    /// Seconds as `f64`
    #[must_use]
    pub fn as_seconds(self) -> f64 {
        self.0
    }

    /// Seconds elapsed since `earlier`, clamped at zero for out-of-order frames
    #[must_use]
    pub fn seconds_since(self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}s", self.0)
    }
}

/// Form score on a 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct FormScore(pub f64);

/// Traffic-light grade of a form score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreGrade {
    /// 80 and above
    Good,
    /// 60 to 80
    Fair,
    /// Below 60
    Poor,
}

impl ScoreGrade {
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            ScoreGrade::Good => "🟢",
            ScoreGrade::Fair => "🟡",
            ScoreGrade::Poor => "🔴",
        }
    }
}

impl FormScore {
    /// Minimum per-rep score for a rep to count as "good"
    pub const GOOD_REP_THRESHOLD: f64 = 70.0;

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true if a rep with this score counts as a good rep
    #[must_use]
    pub fn is_good_rep(self) -> bool {
        self.0 >= Self::GOOD_REP_THRESHOLD
    }

    #[must_use]
    pub fn grade(self) -> ScoreGrade {
        if self.0 >= 80.0 {
            ScoreGrade::Good
        } else if self.0 >= 60.0 {
            ScoreGrade::Fair
        } else {
            ScoreGrade::Poor
        }
    }
}

impl fmt::Display for FormScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}/100", self.0)
    }
}
