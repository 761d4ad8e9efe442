//! Personal record detection
//!
//! Two independent best-value maps are built once per run over the full corpus:
//! heaviest actual weight for weighted sets, most reps for bodyweight sets.
//! Every set equal to its exercise's best is a record; ties are not broken.

use crate::types::{NormalizedSet, SetMetrics};
use std::collections::HashMap;

/// Per-exercise bests used to flag personal records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalBests {
    /// Max actual weight over sets with `actual_weight > 0`
    weighted_best: HashMap<String, f64>,
    /// Max reps over sets with `actual_weight == 0`
    bodyweight_best: HashMap<String, f64>,
}

impl PersonalBests {
    /// Scan index-aligned sets and metrics for per-exercise bests
    pub fn from_sets(sets: &[NormalizedSet], metrics: &[SetMetrics]) -> Self {
        let mut bests = Self::default();

        for (set, metric) in sets.iter().zip(metrics) {
            let (map, value) = if metric.actual_weight > 0.0 {
                (&mut bests.weighted_best, metric.actual_weight)
            } else {
                (&mut bests.bodyweight_best, set.reps)
            };

            map.entry(set.exercise.clone())
                .and_modify(|best| *best = best.max(value))
                .or_insert(value);
        }

        bests
    }

    /// Heaviest weighted set for an exercise
    pub fn weighted_best(&self, exercise: &str) -> Option<f64> {
        self.weighted_best.get(exercise).copied()
    }

    /// Most reps in an unweighted set for an exercise
    pub fn bodyweight_best(&self, exercise: &str) -> Option<f64> {
        self.bodyweight_best.get(exercise).copied()
    }

    /// Whether a set ties the best-ever value for its exercise
    ///
    /// Exercises missing from the relevant map never match.
    pub fn is_record(&self, exercise: &str, reps: f64, metrics: &SetMetrics) -> bool {
        if metrics.actual_weight > 0.0 {
            self.weighted_best(exercise) == Some(metrics.actual_weight)
        } else {
            self.bodyweight_best(exercise) == Some(reps)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricDeriver;
    use chrono::NaiveDate;

    fn make_set(exercise: &str, reps: f64, weight: f64) -> NormalizedSet {
        let day = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        NormalizedSet {
            date: day.and_hms_opt(0, 0, 0).unwrap(),
            day,
            exercise: exercise.to_string(),
            reps,
            weight_per_unit: weight,
            multiplier: 1,
            set_order: None,
            note: None,
        }
    }

    fn flags(sets: &[NormalizedSet]) -> Vec<bool> {
        let metrics = MetricDeriver::derive_all(sets);
        let bests = PersonalBests::from_sets(sets, &metrics);
        sets.iter()
            .zip(&metrics)
            .map(|(s, m)| bests.is_record(&s.exercise, s.reps, m))
            .collect()
    }

    #[test]
    fn test_weighted_ties_all_flagged() {
        let sets = vec![
            make_set("Back Squat", 5.0, 100.0),
            make_set("Back Squat", 5.0, 100.0),
            make_set("Back Squat", 5.0, 100.0),
        ];
        assert_eq!(flags(&sets), vec![true, true, true]);
    }

    #[test]
    fn test_only_heaviest_weighted_flagged() {
        let sets = vec![
            make_set("Back Squat", 8.0, 90.0),
            make_set("Back Squat", 3.0, 110.0),
            make_set("Back Squat", 5.0, 100.0),
        ];
        assert_eq!(flags(&sets), vec![false, true, false]);
    }

    #[test]
    fn test_bodyweight_uses_reps() {
        let sets = vec![
            make_set("Pull-Up", 10.0, 0.0),
            make_set("Pull-Up", 12.0, 0.0),
            make_set("Pull-Up", 8.0, 0.0),
        ];
        assert_eq!(flags(&sets), vec![false, true, false]);
    }

    #[test]
    fn test_weighted_and_bodyweight_tracked_independently() {
        let sets = vec![
            make_set("Dip", 15.0, 0.0),
            make_set("Dip", 6.0, 20.0),
            make_set("Dip", 20.0, 0.0),
            make_set("Dip", 8.0, 10.0),
        ];
        assert_eq!(flags(&sets), vec![false, true, true, false]);
    }

    #[test]
    fn test_exercises_do_not_share_bests() {
        let sets = vec![make_set("Bench Press", 5.0, 80.0), make_set("Incline Press", 5.0, 60.0)];
        assert_eq!(flags(&sets), vec![true, true]);
    }

    #[test]
    fn test_unknown_exercise_never_matches() {
        let bests = PersonalBests::default();
        let metrics = SetMetrics {
            actual_weight: 0.0,
            volume: 0.0,
            one_rep_max_estimate: None,
        };
        assert!(!bests.is_record("Plank", 0.0, &metrics));
    }
}
