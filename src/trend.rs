//! Estimated 1RM trend
//!
//! Builds the per-day best estimated 1RM series for one exercise over a
//! trailing window and fits an ordinary least-squares line through it.

use crate::types::{EnrichedSetRecord, LinearTrend, TrendPoint, TrendReport};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Trend analyzer for a single exercise
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    /// Series and regression for `exercise` over the `weeks` before `today`
    ///
    /// Only weighted sets on or after `today - weeks` are considered. A window
    /// reaching past the earliest representable date covers all history. An
    /// empty selection yields an empty series with no regression.
    pub fn analyze(
        records: &[EnrichedSetRecord],
        exercise: &str,
        weeks: u32,
        today: NaiveDate,
    ) -> TrendReport {
        let window_start = today
            .checked_sub_signed(Duration::weeks(i64::from(weeks)))
            .unwrap_or(NaiveDate::MIN);
        let points = daily_maxima(records, exercise, window_start);
        let regression = fit_line(&points);

        TrendReport {
            exercise: exercise.to_string(),
            window_start,
            window_weeks: weeks,
            points,
            regression,
        }
    }
}

/// Max estimated 1RM per day, oldest first
fn daily_maxima(
    records: &[EnrichedSetRecord],
    exercise: &str,
    window_start: NaiveDate,
) -> Vec<TrendPoint> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for record in records {
        if record.exercise != exercise || !record.is_weighted() || record.day < window_start {
            continue;
        }
        if let Some(estimate) = record.one_rep_max_estimate {
            by_day
                .entry(record.day)
                .and_modify(|best| *best = best.max(estimate))
                .or_insert(estimate);
        }
    }

    by_day
        .into_iter()
        .map(|(day, one_rep_max_estimate)| TrendPoint {
            day,
            one_rep_max_estimate,
        })
        .collect()
}

/// Least-squares fit of estimate against days elapsed since the first point
///
/// Needs at least two distinct days.
fn fit_line(points: &[TrendPoint]) -> Option<LinearTrend> {
    let first = points.first()?;
    let last = points.last()?;
    if points.len() < 2 {
        return None;
    }

    let origin = first.day;
    let n = points.len() as f64;
    let xs: Vec<f64> = points
        .iter()
        .map(|p| (p.day - origin).num_days() as f64)
        .collect();

    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.one_rep_max_estimate).sum::<f64>() / n;

    let (sxy, sxx) = xs
        .iter()
        .zip(points)
        .fold((0.0, 0.0), |(sxy, sxx), (x, p)| {
            let dx = x - mean_x;
            (sxy + dx * (p.one_rep_max_estimate - mean_y), sxx + dx * dx)
        });

    if sxx == 0.0 {
        return None;
    }

    let slope_per_day = sxy / sxx;
    let intercept = mean_y - slope_per_day * mean_x;
    let span = (last.day - origin).num_days() as f64;

    Some(LinearTrend {
        origin,
        slope_per_day,
        intercept,
        start_value: intercept,
        end_value: intercept + slope_per_day * span,
    })
}
