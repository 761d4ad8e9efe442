//! Acute:chronic workload ratio
//!
//! Compares the most recent week's volume against the mean volume of the
//! preceding weeks and classifies the ratio into training bands.

use crate::config::AcwrConfig;
use crate::types::{AcwrOutcome, AcwrZone, WeeklySummary};

/// ACWR analyzer over weekly summaries
#[derive(Debug, Clone, Default)]
pub struct LoadRatioAnalyzer {
    config: AcwrConfig,
}

impl LoadRatioAnalyzer {
    pub fn new(config: AcwrConfig) -> Self {
        Self { config }
    }

    /// Compute the ratio for the most recent week
    ///
    /// `weeks` must be ordered most recent first, as produced by
    /// [`crate::weekly::WeeklyAggregator`].
    pub fn analyze(&self, weeks: &[WeeklySummary]) -> AcwrOutcome {
        let volumes: Vec<f64> = weeks.iter().map(|w| w.total_volume).collect();
        self.analyze_volumes(&volumes)
    }

    /// Same as [`Self::analyze`] over raw weekly volumes, most recent first
    pub fn analyze_volumes(&self, volumes: &[f64]) -> AcwrOutcome {
        if volumes.len() < self.config.min_weeks.max(2) {
            return AcwrOutcome::NotComputable {
                weeks_available: volumes.len(),
            };
        }

        let acute = volumes[0];
        let chronic_window = &volumes[1..volumes.len().min(self.config.chronic_weeks + 1)];
        let chronic_weeks_used = chronic_window.len();
        let chronic = chronic_window.iter().sum::<f64>() / chronic_weeks_used as f64;

        if chronic.is_nan() || chronic <= 0.0 {
            return AcwrOutcome::Undefined {
                acute,
                chronic_weeks_used,
            };
        }

        let ratio = acute / chronic;
        AcwrOutcome::Computed {
            acute,
            chronic,
            ratio,
            zone: self.classify(ratio),
            chronic_weeks_used,
        }
    }

    /// Band for a ratio; the optimal band is inclusive at both ends
    pub fn classify(&self, ratio: f64) -> AcwrZone {
        if ratio > self.config.optimal_high {
            AcwrZone::HighFatigue
        } else if ratio < self.config.optimal_low {
            AcwrZone::UnderTraining
        } else {
            AcwrZone::Optimal
        }
    }
}
