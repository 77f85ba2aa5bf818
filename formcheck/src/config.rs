//! Analyzer configuration
//!
//! Ideal ranges and tolerances used by the feedback rules and the form score.
//! Loaded from a JSON file; any field left out keeps its default.

use crate::domain::ConfigError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Closed range of acceptable values `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
}

impl IdealRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Value lies inside the strict ideal range (inclusive)
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Value lies inside the range widened by `tolerance` on both ends
    #[must_use]
    pub fn contains_with_tolerance(&self, value: f64, tolerance: f64) -> bool {
        self.min - tolerance <= value && value <= self.max + tolerance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Knee angle (hip-knee-ankle), degrees
    pub knee_ideal_range: IdealRange,
    /// Hip angle (shoulder-hip-knee), degrees
    pub hip_ideal_range: IdealRange,
    /// Ankle angle, degrees. Carried for completeness; no rule reads it yet.
    pub ankle_ideal_range: IdealRange,
    /// Torso lean from vertical, degrees
    pub back_ideal_range: IdealRange,
    /// Slack around every angle range, degrees
    pub angle_tolerance: f64,
    /// Maximum hip/ankle horizontal offset, normalized units
    pub balance_tolerance: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            knee_ideal_range: IdealRange::new(80.0, 100.0),
            hip_ideal_range: IdealRange::new(70.0, 90.0),
            ankle_ideal_range: IdealRange::new(70.0, 90.0),
            back_ideal_range: IdealRange::new(15.0, 30.0),
            angle_tolerance: 10.0,
            balance_tolerance: 0.1,
        }
    }
}

impl AnalyzerConfig {
    /// Load and validate a JSON config file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails [`AnalyzerConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: AnalyzerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!("Loaded analyzer configuration from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty-printed JSON
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check that every range is ordered and every tolerance is non-negative
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges = [
            ("knee_ideal_range", self.knee_ideal_range),
            ("hip_ideal_range", self.hip_ideal_range),
            ("ankle_ideal_range", self.ankle_ideal_range),
            ("back_ideal_range", self.back_ideal_range),
        ];
        for (name, range) in ranges {
            if range.min.is_nan() || range.max.is_nan() || range.min > range.max {
                return Err(ConfigError::InvalidRange { name, min: range.min, max: range.max });
            }
        }

        let tolerances = [
            ("angle_tolerance", self.angle_tolerance),
            ("balance_tolerance", self.balance_tolerance),
        ];
        for (name, value) in tolerances {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::InvalidTolerance { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.knee_ideal_range, IdealRange::new(80.0, 100.0));
        assert_eq!(config.back_ideal_range, IdealRange::new(15.0, 30.0));
        assert!((config.balance_tolerance - 0.1).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = IdealRange::new(80.0, 100.0);
        assert!(range.contains(80.0));
        assert!(range.contains(100.0));
        assert!(!range.contains(100.1));
        assert!(range.contains_with_tolerance(70.0, 10.0));
        assert!(!range.contains_with_tolerance(69.9, 10.0));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = r#"{"angle_tolerance": 5.0, "knee_ideal_range": {"min": 85.0, "max": 95.0}}"#;
        file.write_all(json.as_bytes()).unwrap();

        let config = AnalyzerConfig::load(file.path()).unwrap();
        assert!((config.angle_tolerance - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.knee_ideal_range, IdealRange::new(85.0, 95.0));
        assert_eq!(config.hip_ideal_range, IdealRange::new(70.0, 90.0));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let config = AnalyzerConfig {
            back_ideal_range: IdealRange::new(30.0, 15.0),
            ..AnalyzerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { name: "back_ideal_range", .. })
        ));
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let config = AnalyzerConfig { balance_tolerance: -0.1, ..AnalyzerConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTolerance { name: "balance_tolerance", .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analyzer.json");
        let config = AnalyzerConfig { angle_tolerance: 12.5, ..AnalyzerConfig::default() };

        config.save(&path).unwrap();
        assert_eq!(AnalyzerConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(AnalyzerConfig::load(file.path()), Err(ConfigError::ParseFailed(_))));
    }
}
