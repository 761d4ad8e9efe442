//! Set normalization
//!
//! This module turns raw set records into typed, cleaned sets.
//! - Dates parsed from several timestamp layouts; unparsable rows dropped
//! - Numeric fields coerced with safe defaults (0 for reps/weight, 1 for multiplier)
//! - Excluded exercises (cardio by default) filtered out

use crate::config::ExclusionFilter;
use crate::types::{NormalizedSet, RawField, RawSetRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

/// Timestamp layouts tried after RFC 3339
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts; the time component becomes midnight
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Normalizer for converting raw set records into typed sets
pub struct Normalizer;

impl Normalizer {
    /// Normalize a batch of raw records, preserving input order
    pub fn normalize(records: &[RawSetRecord], filter: &ExclusionFilter) -> Vec<NormalizedSet> {
        let mut dropped_dates = 0usize;
        let mut excluded = 0usize;

        let sets: Vec<NormalizedSet> = records
            .iter()
            .filter_map(|record| {
                let Some(date) = record.date.as_ref().and_then(parse_timestamp) else {
                    dropped_dates += 1;
                    return None;
                };

                let exercise = record.exercise.trim();
                if filter.is_excluded(exercise) {
                    excluded += 1;
                    return None;
                }

                Some(NormalizedSet {
                    date,
                    day: date.date(),
                    exercise: exercise.to_string(),
                    reps: coerce_non_negative(record.reps.as_ref(), "reps", exercise),
                    weight_per_unit: coerce_non_negative(
                        record.weight_per_unit.as_ref(),
                        "weight_per_unit",
                        exercise,
                    ),
                    multiplier: coerce_multiplier(record.multiplier.as_ref(), exercise),
                    set_order: coerce_set_order(record.set_order.as_ref()),
                    note: record
                        .note
                        .as_deref()
                        .map(str::trim)
                        .filter(|n| !n.is_empty())
                        .map(str::to_string),
                })
            })
            .collect();

        debug!(
            input = records.len(),
            kept = sets.len(),
            dropped_dates,
            excluded,
            "normalized set log"
        );

        sets
    }
}

/// Parse a raw date cell into a timestamp
///
/// Numbers are read as Unix seconds (UTC). Offsets in RFC 3339 strings are kept
/// as local wall-clock time so the calendar day matches what the lifter logged.
///
/// Compact dates such as `20240115` arrive from CSV as numbers and are read as
/// seconds (1970-08-23 for that example). Use a separated layout instead.
pub fn parse_timestamp(field: &RawField) -> Option<NaiveDateTime> {
    match field {
        RawField::Number(secs) if secs.is_finite() => {
            DateTime::from_timestamp(secs.trunc() as i64, 0).map(|dt| dt.naive_utc())
        }
        RawField::Text(text) => parse_timestamp_str(text.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(text: &str) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Coerce to a number >= 0; missing or non-numeric becomes 0
fn coerce_non_negative(field: Option<&RawField>, name: &str, exercise: &str) -> f64 {
    match field.and_then(RawField::as_number) {
        Some(value) if value < 0.0 => {
            warn!(field = name, exercise, value, "negative value clamped to 0");
            0.0
        }
        Some(value) => value,
        None => 0.0,
    }
}

/// Coerce the unit multiplier; anything missing, non-numeric or below 1 becomes 1
///
/// Multipliers count whole units, so fractional values round to the nearest
/// integer.
fn coerce_multiplier(field: Option<&RawField>, exercise: &str) -> u32 {
    match field.and_then(RawField::as_number) {
        Some(value) if value >= 1.0 => {
            let rounded = value.round().min(u32::MAX as f64);
            if rounded != value {
                warn!(exercise, value, rounded, "fractional multiplier rounded");
            }
            rounded as u32
        }
        _ => 1,
    }
}

fn coerce_set_order(field: Option<&RawField>) -> Option<u32> {
    field
        .and_then(RawField::as_number)
        .filter(|value| *value >= 1.0)
        .map(|value| value.round().min(u32::MAX as f64) as u32)
}
