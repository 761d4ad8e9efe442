//! Set sequencing
//!
//! Assigns each set its ordinal within the (day, exercise) group.

use crate::types::NormalizedSet;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Sequencer for intra-session set numbers
pub struct SetSequencer;

impl SetSequencer {
    /// Set numbers index-aligned with `sets`
    ///
    /// An explicit `set_order` is used as-is; otherwise the set gets its 1-based
    /// position within the group, following input order.
    pub fn sequence(sets: &[NormalizedSet]) -> Vec<u32> {
        let mut counters: HashMap<(NaiveDate, &str), u32> = HashMap::new();

        sets.iter()
            .map(|set| {
                let position = counters
                    .entry((set.day, set.exercise.as_str()))
                    .and_modify(|n| *n += 1)
                    .or_insert(1);
                set.set_order.unwrap_or(*position)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_set(day: u32, exercise: &str, set_order: Option<u32>) -> NormalizedSet {
        let day = NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
        NormalizedSet {
            date: day.and_hms_opt(9, 0, 0).unwrap(),
            day,
            exercise: exercise.to_string(),
            reps: 5.0,
            weight_per_unit: 20.0,
            multiplier: 1,
            set_order,
            note: None,
        }
    }

    #[test]
    fn test_numbers_per_day_and_exercise() {
        let sets = vec![
            make_set(1, "Bench Press", None),
            make_set(1, "Barbell Row", None),
            make_set(1, "Bench Press", None),
            make_set(2, "Bench Press", None),
            make_set(1, "Barbell Row", None),
            make_set(1, "Bench Press", None),
        ];
        assert_eq!(SetSequencer::sequence(&sets), vec![1, 1, 2, 1, 2, 3]);
    }

    #[test]
    fn test_explicit_order_wins() {
        let sets = vec![
            make_set(1, "Deadlift", Some(4)),
            make_set(1, "Deadlift", None),
        ];
        assert_eq!(SetSequencer::sequence(&sets), vec![4, 2]);
    }

    #[test]
    fn test_idempotent() {
        let sets = vec![make_set(3, "Curl", None), make_set(3, "Curl", None)];
        assert_eq!(SetSequencer::sequence(&sets), SetSequencer::sequence(&sets));
    }
}
