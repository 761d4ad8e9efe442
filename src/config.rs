//! Analyzer configuration
//!
//! Tunable policy for the pipeline: which exercises to drop, the ACWR windows and
//! bands, and the default trend window. Every field has a default so partial JSON
//! documents are accepted.

use crate::error::ComputeError;
use serde::{Deserialize, Serialize};

/// Exercises removed by default (cardio machines and activities)
pub const DEFAULT_EXCLUDED_EXERCISES: [&str; 3] = ["Stair Stepper", "Cycling", "Running"];

/// Default number of prior weeks averaged into chronic load
pub const DEFAULT_CHRONIC_WEEKS: usize = 4;

/// Default trailing window for the 1RM trend (weeks)
pub const DEFAULT_TREND_WEEKS: u32 = 12;

/// ACWR policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcwrConfig {
    /// Prior weeks averaged into chronic load (fewer are used when unavailable)
    pub chronic_weeks: usize,
    /// Minimum weeks of data (acute week included) before a ratio is reported
    pub min_weeks: usize,
    /// Lower bound of the optimal band (inclusive)
    pub optimal_low: f64,
    /// Upper bound of the optimal band (inclusive)
    pub optimal_high: f64,
}

impl Default for AcwrConfig {
    fn default() -> Self {
        Self {
            chronic_weeks: DEFAULT_CHRONIC_WEEKS,
            min_weeks: 2,
            optimal_low: 0.8,
            optimal_high: 1.3,
        }
    }
}

/// Top-level configuration for [`crate::pipeline::LiftAnalyzer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Case-insensitive substrings; matching exercises are dropped
    pub excluded_exercises: Vec<String>,
    pub acwr: AcwrConfig,
    /// Default trailing window for the trend analyzer (weeks)
    pub trend_weeks: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            excluded_exercises: DEFAULT_EXCLUDED_EXERCISES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            acwr: AcwrConfig::default(),
            trend_weeks: DEFAULT_TREND_WEEKS,
        }
    }
}

impl AnalyzerConfig {
    /// Check internal consistency
    pub fn validate(&self) -> Result<(), ComputeError> {
        if self.acwr.chronic_weeks == 0 {
            return Err(ComputeError::InvalidConfig(
                "acwr.chronic_weeks must be at least 1".to_string(),
            ));
        }
        if self.acwr.min_weeks < 2 {
            return Err(ComputeError::InvalidConfig(
                "acwr.min_weeks must be at least 2".to_string(),
            ));
        }
        if self.acwr.optimal_low > self.acwr.optimal_high {
            return Err(ComputeError::InvalidConfig(format!(
                "acwr optimal band is empty ({} > {})",
                self.acwr.optimal_low, self.acwr.optimal_high
            )));
        }
        if self.trend_weeks == 0 {
            return Err(ComputeError::InvalidConfig(
                "trend_weeks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ComputeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Build the exercise filter for the normalizer
    pub fn exclusion_filter(&self) -> ExclusionFilter {
        ExclusionFilter::new(&self.excluded_exercises)
    }
}

/// Case-insensitive substring filter over exercise names
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    patterns: Vec<String>,
}

impl ExclusionFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Whether `exercise` contains any excluded pattern
    pub fn is_excluded(&self, exercise: &str) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let name = exercise.to_lowercase();
        self.patterns.iter().any(|p| name.contains(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.acwr.chronic_weeks, 4);
        assert_eq!(config.excluded_exercises.len(), 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AnalyzerConfig::from_json(r#"{"acwr": {"chronic_weeks": 3}}"#).unwrap();
        assert_eq!(config.acwr.chronic_weeks, 3);
        assert_eq!(config.acwr.min_weeks, 2);
        assert_eq!(config.trend_weeks, DEFAULT_TREND_WEEKS);
        assert!(config
            .excluded_exercises
            .contains(&"Stair Stepper".to_string()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = AnalyzerConfig::from_json(r#"{"acwr": {"chronic_weeks": 0}}"#);
        assert!(matches!(result, Err(ComputeError::InvalidConfig(_))));

        let result =
            AnalyzerConfig::from_json(r#"{"acwr": {"optimal_low": 1.5, "optimal_high": 1.0}}"#);
        assert!(matches!(result, Err(ComputeError::InvalidConfig(_))));

        let result = AnalyzerConfig::from_json("not json");
        assert!(matches!(result, Err(ComputeError::JsonError(_))));
    }

    #[test]
    fn test_exclusion_filter_case_insensitive_substring() {
        let filter = AnalyzerConfig::default().exclusion_filter();
        assert!(filter.is_excluded("Stair Stepper Level 5"));
        assert!(filter.is_excluded("STAIR STEPPER"));
        assert!(filter.is_excluded("Indoor cycling"));
        assert!(!filter.is_excluded("Back Squat"));
    }

    #[test]
    fn test_empty_filter_excludes_nothing() {
        let filter = ExclusionFilter::new(&["", "  "]);
        assert!(!filter.is_excluded("Running"));
    }
}
