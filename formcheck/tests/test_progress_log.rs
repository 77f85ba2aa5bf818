use formcheck::analysis::FormAnalyzer;
use formcheck::export::{backup_path, ProgressLog, SessionRecord};
use formcheck::report::summary_lines;
use formcheck::session::SessionTracker;
use formcheck::source::{LandmarkSource, SimulatedSquat};
use tempfile::TempDir;

fn simulated_session(reps: u32) -> SessionRecord {
    let analyzer = FormAnalyzer::default();
    let mut tracker = SessionTracker::new();
    let mut source = SimulatedSquat::new(30.0).with_reps(reps);

    while let Some(frame) = source.next_frame().unwrap() {
        let result = analyzer.analyze(&frame.frame);
        tracker.record(frame.timestamp, &result, analyzer.score(&result));
    }
    SessionRecord::from_summary(&tracker.summary())
}

#[test]
fn test_sessions_accumulate_across_runs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("squat_progress.json");

    let mut log = ProgressLog::load(&path).unwrap();
    assert!(log.is_empty());
    log.append(simulated_session(2));
    log.save(&path).unwrap();

    let mut log = ProgressLog::load(&path).unwrap();
    assert_eq!(log.len(), 1);
    log.append(simulated_session(3));
    log.save(&path).unwrap();

    let log = ProgressLog::load(&path).unwrap();
    let delta = log.compare_last_two().expect("two sessions");
    assert_eq!(delta.previous.total_squats, 2);
    assert_eq!(delta.current.total_squats, 3);
    assert_eq!(delta.rep_change(), 1);
    assert!(delta.current.duration_minutes > delta.previous.duration_minutes);

    let lines = summary_lines(&SessionTracker::new().summary(), Some(&delta));
    assert!(lines.iter().any(|l| l.contains("PROGRESS vs LAST SESSION")));
}

#[test]
fn test_progress_file_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("squat_progress.json");

    let mut log = ProgressLog::default();
    log.append(simulated_session(1));
    log.save(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let session = &json["sessions"][0];
    assert_eq!(session["total_squats"], 1);
    assert!(session["recorded_at"].as_u64().unwrap() > 0);
    assert!(session["phase_seconds"]["deep_squat"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_corrupt_log_survives_a_new_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("squat_progress.json");

    let mut log = ProgressLog::default();
    log.append(simulated_session(2));
    log.save(&path).unwrap();
    let saved = std::fs::read_to_string(&path).unwrap();
    let truncated = &saved[..saved.len() / 2];
    std::fs::write(&path, truncated).unwrap();

    let mut log = ProgressLog::load(&path).unwrap();
    assert!(log.is_empty());
    log.append(simulated_session(1));
    log.save(&path).unwrap();

    assert_eq!(std::fs::read_to_string(backup_path(&path)).unwrap(), truncated);
    let log = ProgressLog::load(&path).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log.last().unwrap().total_squats, 1);
}
