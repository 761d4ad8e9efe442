//! Load metric derivation
//!
//! This module derives per-set load metrics from normalized sets:
//! - Actual weight (unit weight x multiplier)
//! - Volume (actual weight x reps)
//! - Estimated 1RM (Epley) and relative intensity

use crate::types::{NormalizedSet, SetMetrics};
use std::collections::HashMap;

/// Divisor in the Epley formula
const EPLEY_REP_DIVISOR: f64 = 30.0;

/// Metric deriver for computing per-set load figures
pub struct MetricDeriver;

impl MetricDeriver {
    /// Derive load metrics for a single set
    pub fn derive(set: &NormalizedSet) -> SetMetrics {
        let actual_weight = set.weight_per_unit * f64::from(set.multiplier);
        let volume = actual_weight * set.reps;
        let one_rep_max_estimate =
            (actual_weight > 0.0).then(|| epley_one_rep_max(actual_weight, set.reps));

        SetMetrics {
            actual_weight,
            volume,
            one_rep_max_estimate,
        }
    }

    /// Derive metrics for every set, index-aligned with the input
    pub fn derive_all(sets: &[NormalizedSet]) -> Vec<SetMetrics> {
        sets.iter().map(Self::derive).collect()
    }
}

/// Epley one-repetition-maximum estimate
///
/// Formula: `weight * (1 + reps / 30)` for more than one rep, otherwise the
/// weight itself.
pub fn epley_one_rep_max(actual_weight: f64, reps: f64) -> f64 {
    if reps > 1.0 {
        actual_weight * (1.0 + reps / EPLEY_REP_DIVISOR)
    } else {
        actual_weight
    }
}

/// All-time best estimated 1RM per exercise
///
/// Built once over the whole corpus so intensity does not depend on which
/// day or exercise a caller later selects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OneRepMaxBests {
    best: HashMap<String, f64>,
}

impl OneRepMaxBests {
    /// Collect per-exercise maxima from index-aligned sets and metrics
    pub fn from_sets(sets: &[NormalizedSet], metrics: &[SetMetrics]) -> Self {
        let mut best: HashMap<String, f64> = HashMap::new();

        for (set, metric) in sets.iter().zip(metrics) {
            if let Some(estimate) = metric.one_rep_max_estimate {
                best.entry(set.exercise.clone())
                    .and_modify(|current| *current = current.max(estimate))
                    .or_insert(estimate);
            }
        }

        Self { best }
    }

    /// Best estimate for an exercise, if it has any weighted set
    pub fn get(&self, exercise: &str) -> Option<f64> {
        self.best.get(exercise).copied()
    }

    /// Estimated 1RM as a percentage of the exercise's all-time best
    ///
    /// Unweighted sets (and exercises with no positive best) score 0.
    pub fn intensity_percent(&self, exercise: &str, metrics: &SetMetrics) -> f64 {
        match (metrics.one_rep_max_estimate, self.get(exercise)) {
            (Some(estimate), Some(best)) if metrics.actual_weight > 0.0 && best > 0.0 => {
                estimate / best * 100.0
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_set(exercise: &str, reps: f64, weight: f64, multiplier: u32) -> NormalizedSet {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        NormalizedSet {
            date: day.and_hms_opt(0, 0, 0).unwrap(),
            day,
            exercise: exercise.to_string(),
            reps,
            weight_per_unit: weight,
            multiplier,
            set_order: None,
            note: None,
        }
    }

    #[test]
    fn test_actual_weight_and_volume() {
        let metrics = MetricDeriver::derive(&make_set("Back Squat", 5.0, 100.0, 1));
        assert_eq!(metrics.actual_weight, 100.0);
        assert_eq!(metrics.volume, 500.0);
    }

    #[test]
    fn test_multiplier_doubles_load() {
        let metrics = MetricDeriver::derive(&make_set("Bench Press", 5.0, 50.0, 2));
        assert_eq!(metrics.actual_weight, 100.0);
        assert_eq!(metrics.volume, 500.0);
        // 100 * (1 + 5/30) = 116.67
        let estimate = metrics.one_rep_max_estimate.unwrap();
        assert!((estimate - 116.666_666).abs() < 0.001);
    }

    #[test]
    fn test_single_rep_estimate_is_weight() {
        assert_eq!(epley_one_rep_max(140.0, 1.0), 140.0);
        assert_eq!(epley_one_rep_max(140.0, 0.0), 140.0);
    }

    #[test]
    fn test_bodyweight_has_no_estimate() {
        let metrics = MetricDeriver::derive(&make_set("Pull-Up", 12.0, 0.0, 1));
        assert_eq!(metrics.actual_weight, 0.0);
        assert_eq!(metrics.volume, 0.0);
        assert!(metrics.one_rep_max_estimate.is_none());
    }

    #[test]
    fn test_intensity_relative_to_corpus_best() {
        let sets = vec![
            make_set("Deadlift", 1.0, 200.0, 1),
            make_set("Deadlift", 1.0, 150.0, 1),
            make_set("Chin-Up", 8.0, 0.0, 1),
        ];
        let metrics = MetricDeriver::derive_all(&sets);
        let bests = OneRepMaxBests::from_sets(&sets, &metrics);

        assert_eq!(bests.get("Deadlift"), Some(200.0));
        assert_eq!(bests.get("Chin-Up"), None);

        assert!((bests.intensity_percent("Deadlift", &metrics[0]) - 100.0).abs() < 1e-9);
        assert!((bests.intensity_percent("Deadlift", &metrics[1]) - 75.0).abs() < 1e-9);
        assert_eq!(bests.intensity_percent("Chin-Up", &metrics[2]), 0.0);
    }
}
