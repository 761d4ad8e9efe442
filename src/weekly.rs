//! Weekly aggregation
//!
//! Rolls enriched sets up into ISO-week summaries, most recent week first.

use crate::types::{EnrichedSetRecord, WeeklySummary};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Running totals for one ISO week
#[derive(Default)]
struct WeekAccumulator<'a> {
    total_volume: f64,
    heaviest_lift: f64,
    total_reps: f64,
    exercises: HashSet<&'a str>,
}

/// Aggregator for ISO-week summaries
pub struct WeeklyAggregator;

impl WeeklyAggregator {
    /// Summarize every ISO week present in `records`, most recent first
    pub fn aggregate(records: &[EnrichedSetRecord]) -> Vec<WeeklySummary> {
        let mut weeks: BTreeMap<(i32, u32), WeekAccumulator> = BTreeMap::new();

        for record in records {
            let iso = record.date.iso_week();
            let week = weeks.entry((iso.year(), iso.week())).or_default();
            week.total_volume += record.volume;
            week.heaviest_lift = week.heaviest_lift.max(record.actual_weight);
            week.total_reps += record.reps;
            week.exercises.insert(record.exercise.as_str());
        }

        debug!(sets = records.len(), weeks = weeks.len(), "aggregated weekly summaries");

        weeks
            .into_iter()
            .rev()
            .filter_map(|((iso_year, week), acc)| {
                let week_start = NaiveDate::from_isoywd_opt(iso_year, week, Weekday::Mon)?;
                Some(WeeklySummary {
                    iso_year,
                    week,
                    week_start,
                    total_volume: acc.total_volume,
                    heaviest_lift: acc.heaviest_lift,
                    total_reps: acc.total_reps,
                    unique_exercise_count: acc.exercises.len(),
                })
            })
            .collect()
    }

    /// The `last` most recent weeks (all weeks when `None`)
    pub fn recent(records: &[EnrichedSetRecord], last: Option<usize>) -> Vec<WeeklySummary> {
        let mut weeks = Self::aggregate(records);
        if let Some(k) = last {
            weeks.truncate(k);
        }
        weeks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn make_record(
        date: (i32, u32, u32),
        exercise: &str,
        reps: f64,
        weight: f64,
    ) -> EnrichedSetRecord {
        let day = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        EnrichedSetRecord {
            date: day.and_hms_opt(10, 0, 0).unwrap(),
            day,
            exercise: exercise.to_string(),
            reps,
            weight_per_unit: weight,
            multiplier: 1,
            set_order: None,
            note: None,
            actual_weight: weight,
            volume: weight * reps,
            one_rep_max_estimate: None,
            is_personal_record: false,
            category: Category::Other,
            set_number: 1,
            intensity_percent: 0.0,
        }
    }

    #[test]
    fn test_week_totals() {
        // 2024-01-15 (Mon) and 2024-01-21 (Sun) share ISO week 3
        let records = vec![
            make_record((2024, 1, 15), "Back Squat", 5.0, 100.0),
            make_record((2024, 1, 15), "Back Squat", 5.0, 100.0),
            make_record((2024, 1, 21), "Bench Press", 8.0, 60.0),
            make_record((2024, 1, 22), "Pull-Up", 10.0, 0.0),
        ];

        let weeks = WeeklyAggregator::aggregate(&records);
        assert_eq!(weeks.len(), 2);

        // Most recent first
        assert_eq!((weeks[0].iso_year, weeks[0].week), (2024, 4));
        assert_eq!(weeks[0].total_volume, 0.0);
        assert_eq!(weeks[0].total_reps, 10.0);
        assert_eq!(weeks[0].unique_exercise_count, 1);

        assert_eq!((weeks[1].iso_year, weeks[1].week), (2024, 3));
        assert_eq!(weeks[1].week_start, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(weeks[1].total_volume, 500.0 + 500.0 + 480.0);
        assert_eq!(weeks[1].heaviest_lift, 100.0);
        assert_eq!(weeks[1].total_reps, 18.0);
        assert_eq!(weeks[1].unique_exercise_count, 2);
    }

    #[test]
    fn test_year_boundary_uses_iso_year() {
        // 2024-12-30 belongs to ISO week 1 of 2025; 2024-01-01 is week 1 of 2024
        let records = vec![
            make_record((2024, 1, 1), "Deadlift", 3.0, 150.0),
            make_record((2024, 12, 30), "Deadlift", 3.0, 160.0),
        ];

        let weeks = WeeklyAggregator::aggregate(&records);
        assert_eq!(weeks.len(), 2);
        assert_eq!((weeks[0].iso_year, weeks[0].week), (2025, 1));
        assert_eq!((weeks[1].iso_year, weeks[1].week), (2024, 1));
    }

    #[test]
    fn test_recent_truncates() {
        let records = vec![
            make_record((2024, 3, 4), "Curl", 10.0, 10.0),
            make_record((2024, 3, 11), "Curl", 10.0, 10.0),
            make_record((2024, 3, 18), "Curl", 10.0, 10.0),
        ];
        let weeks = WeeklyAggregator::recent(&records, Some(2));
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].week_start, NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
        assert_eq!(WeeklyAggregator::recent(&records, None).len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(WeeklyAggregator::aggregate(&[]).is_empty());
    }
}
