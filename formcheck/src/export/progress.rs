//! Training progress log
//!
//! Every finished session appends one [`SessionRecord`] to a JSON file
//! (`squat_progress.json` by default), so consecutive sessions can be
//! compared.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::ExportError;
use crate::session::{PhaseDurations, SessionSummary};

/// Default progress log file name
pub const DEFAULT_PROGRESS_FILE: &str = "squat_progress.json";

/// Where an unparseable log at `path` is moved: the same name plus `.bak`
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// One saved training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unix seconds at which the session was saved
    pub recorded_at: u64,
    pub duration_minutes: f64,
    pub total_squats: u32,
    pub good_reps: u32,
    pub success_rate: f64,
    pub avg_form_score: f64,
    #[serde(default)]
    pub phase_seconds: PhaseDurations,
}

impl SessionRecord {
    /// Build a record from a session summary, stamped with the current time
    #[must_use]
    pub fn from_summary(summary: &SessionSummary) -> Self {
        let recorded_at = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs());
        Self::from_summary_at(summary, recorded_at)
    }

    #[must_use]
    pub fn from_summary_at(summary: &SessionSummary, recorded_at: u64) -> Self {
        Self {
            recorded_at,
            duration_minutes: summary.duration_seconds / 60.0,
            total_squats: summary.total_reps,
            good_reps: summary.good_reps,
            success_rate: summary.success_rate,
            avg_form_score: summary.average_score.unwrap_or(0.0),
            phase_seconds: summary.phase_seconds,
        }
    }
}

/// Change between the two most recent sessions
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressDelta {
    pub previous: SessionRecord,
    pub current: SessionRecord,
}

impl ProgressDelta {
    #[must_use]
    pub fn rep_change(&self) -> i64 {
        i64::from(self.current.total_squats) - i64::from(self.previous.total_squats)
    }

    /// Success rate change in percentage points
    #[must_use]
    pub fn success_rate_change(&self) -> f64 {
        self.current.success_rate - self.previous.success_rate
    }
}

/// All saved sessions, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressLog {
    pub sessions: Vec<SessionRecord>,
}

impl ProgressLog {
    /// Load the log
    ///
    /// A missing file yields an empty log. A file that cannot be parsed is
    /// moved aside to [`backup_path`] so the next save does not overwrite
    /// it, and an empty log is returned.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, or if an unparseable file
    /// cannot be moved aside.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Self>(&contents) {
            Ok(log) => {
                info!("Loaded {} previous sessions from {}", log.sessions.len(), path.display());
                Ok(log)
            }
            Err(e) => {
                let backup = backup_path(path);
                fs::rename(path, &backup).map_err(|source| ExportError::WriteFailed {
                    path: backup.clone(),
                    source,
                })?;
                warn!(
                    "Unreadable progress log {} ({e}); moved to {}, starting fresh",
                    path.display(),
                    backup.display()
                );
                Ok(Self::default())
            }
        }
    }

    /// Write the log as pretty-printed JSON, replacing the file
    ///
    /// # Errors
    /// Returns an error if the log cannot be serialized or the file cannot be
    /// written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .map_err(|source| ExportError::WriteFailed { path: path.to_path_buf(), source })
    }

    pub fn append(&mut self, record: SessionRecord) {
        self.sessions.push(record);
    }

    #[must_use]
    pub fn last(&self) -> Option<&SessionRecord> {
        self.sessions.last()
    }

    /// Compare the two most recent sessions
    #[must_use]
    pub fn compare_last_two(&self) -> Option<ProgressDelta> {
        match self.sessions.as_slice() {
            [.., previous, current] => {
                Some(ProgressDelta { previous: previous.clone(), current: current.clone() })
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
