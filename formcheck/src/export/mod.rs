//! Session persistence and export
//!
//! - [`ProgressLog`] - history of finished sessions, compared across runs
//! - [`FrameExporter`] - per-frame analysis dump for offline inspection

pub mod frames;
pub mod progress;

pub use frames::{ExportedFrame, FrameExporter};
pub use progress::{
    backup_path, ProgressDelta, ProgressLog, SessionRecord, DEFAULT_PROGRESS_FILE,
};
