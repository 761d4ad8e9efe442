//! Core types for the liftlog pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: raw set records, normalized sets, enriched sets, and the summary
//! records produced by the weekly, load-ratio and trend stages.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A loosely-typed input cell.
///
/// Set logs come from spreadsheets and phone exports, so numeric columns may hold
/// text ("", "n/a", "12 ") and date columns may hold either strings or Unix
/// timestamps. Coercion to concrete values happens in the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
    /// Anything else (booleans, nested JSON); never numeric
    Other(serde_json::Value),
}

impl RawField {
    /// Interpret the cell as a finite number, if possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawField::Number(n) if n.is_finite() => Some(*n),
            RawField::Number(_) => None,
            RawField::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            RawField::Other(_) => None,
        }
    }
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Number(value)
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

/// One logged set, exactly as handed over by the ingestion layer
///
/// Header aliases cover the workout-export CSV (`Date`, `Exercise`, `Reps`,
/// `Weight(kg)`, `multiplier`) as well as snake_case JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSetRecord {
    /// Timestamp or date-like value; rows without a parsable date are dropped
    #[serde(default, alias = "Date")]
    pub date: Option<RawField>,
    /// Free-text exercise name
    #[serde(alias = "Exercise")]
    pub exercise: String,
    /// Repetitions performed
    #[serde(default, alias = "Reps")]
    pub reps: Option<RawField>,
    /// Weight of one unit (e.g. a single dumbbell)
    #[serde(default, alias = "Weight(kg)", alias = "Weight", alias = "weight")]
    pub weight_per_unit: Option<RawField>,
    /// Number of units lifted simultaneously
    #[serde(default, alias = "Multiplier")]
    pub multiplier: Option<RawField>,
    /// Explicit ordinal within the session
    #[serde(default, alias = "Set Order", alias = "set_number")]
    pub set_order: Option<RawField>,
    #[serde(default, alias = "Notes", alias = "Note", alias = "notes")]
    pub note: Option<String>,
}

impl RawSetRecord {
    /// Convenience constructor used by tests and embedding applications
    pub fn new(date: &str, exercise: &str, reps: f64, weight_per_unit: f64) -> Self {
        Self {
            date: Some(RawField::from(date)),
            exercise: exercise.to_string(),
            reps: Some(RawField::Number(reps)),
            weight_per_unit: Some(RawField::Number(weight_per_unit)),
            multiplier: None,
            set_order: None,
            note: None,
        }
    }

    /// Set the multiplier (builder style)
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = Some(RawField::Number(multiplier));
        self
    }

    /// Set the explicit set order (builder style)
    pub fn with_set_order(mut self, set_order: u32) -> Self {
        self.set_order = Some(RawField::Number(set_order as f64));
        self
    }
}

/// A cleaned set with typed fields and a calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSet {
    /// Parsed timestamp (midnight when the source only carried a date)
    pub date: NaiveDateTime,
    /// Calendar day of `date`
    pub day: NaiveDate,
    /// Exercise name, surrounding whitespace trimmed
    pub exercise: String,
    /// Repetitions (>= 0, 0 when missing or invalid)
    pub reps: f64,
    /// Weight of one unit (>= 0, 0 when missing or invalid)
    pub weight_per_unit: f64,
    /// Units lifted at once (>= 1, defaults to 1)
    pub multiplier: u32,
    pub set_order: Option<u32>,
    pub note: Option<String>,
}

/// Per-set load metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetMetrics {
    /// `weight_per_unit * multiplier`
    pub actual_weight: f64,
    /// `actual_weight * reps`
    pub volume: f64,
    /// Epley estimate; only present for weighted sets
    pub one_rep_max_estimate: Option<f64>,
}

/// Body-region / movement category of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Lower,
    Push,
    Pull,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Lower => "Lower",
            Category::Push => "Push",
            Category::Pull => "Pull",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully enriched set record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSetRecord {
    pub date: NaiveDateTime,
    pub day: NaiveDate,
    pub exercise: String,
    pub reps: f64,
    pub weight_per_unit: f64,
    pub multiplier: u32,
    pub set_order: Option<u32>,
    pub note: Option<String>,
    /// True load moved (kg)
    pub actual_weight: f64,
    /// Load x reps (kg)
    pub volume: f64,
    /// Estimated one-repetition maximum (kg); `None` for unweighted sets
    pub one_rep_max_estimate: Option<f64>,
    /// Ties the best-ever weight (weighted) or reps (bodyweight) for the exercise
    pub is_personal_record: bool,
    pub category: Category,
    /// 1-based ordinal within the (day, exercise) group
    pub set_number: u32,
    /// Estimated 1RM as a percentage of the all-time best estimate; 0 when unweighted
    pub intensity_percent: f64,
}

impl EnrichedSetRecord {
    /// Whether external load was moved
    pub fn is_weighted(&self) -> bool {
        self.actual_weight > 0.0
    }
}

/// Totals for one ISO calendar week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// ISO week-numbering year
    pub iso_year: i32,
    /// ISO week number (1-53)
    pub week: u32,
    /// Monday of the week
    pub week_start: NaiveDate,
    pub total_volume: f64,
    /// Max actual weight lifted in the week
    pub heaviest_lift: f64,
    pub total_reps: f64,
    /// Distinct exercise names trained in the week
    pub unique_exercise_count: usize,
}

/// Headline numbers for an arbitrary selection of sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewSummary {
    pub total_volume: f64,
    pub total_sets: usize,
    pub heaviest_lift: f64,
}

/// ACWR classification band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcwrZone {
    /// Ratio below the optimal band
    UnderTraining,
    /// Ratio inside the optimal band (inclusive)
    Optimal,
    /// Ratio above the optimal band
    HighFatigue,
}

impl AcwrZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcwrZone::UnderTraining => "under-training",
            AcwrZone::Optimal => "optimal",
            AcwrZone::HighFatigue => "high-fatigue",
        }
    }
}

/// Result of the acute:chronic workload ratio computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AcwrOutcome {
    /// Not enough weeks of data to compare
    NotComputable { weeks_available: usize },
    /// Prior weeks exist but carry no volume
    Undefined { acute: f64, chronic_weeks_used: usize },
    Computed {
        acute: f64,
        chronic: f64,
        ratio: f64,
        zone: AcwrZone,
        chronic_weeks_used: usize,
    },
}

impl AcwrOutcome {
    /// Ratio if one could be computed
    pub fn ratio(&self) -> Option<f64> {
        match self {
            AcwrOutcome::Computed { ratio, .. } => Some(*ratio),
            _ => None,
        }
    }

    /// Zone if a ratio could be computed
    pub fn zone(&self) -> Option<AcwrZone> {
        match self {
            AcwrOutcome::Computed { zone, .. } => Some(*zone),
            _ => None,
        }
    }
}

/// Best estimated 1RM on one training day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub day: NaiveDate,
    pub one_rep_max_estimate: f64,
}

/// Ordinary least-squares line through a trend series
///
/// `x` is days elapsed since `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTrend {
    pub origin: NaiveDate,
    /// Change in estimated 1RM per day
    pub slope_per_day: f64,
    /// Fitted value at `origin`
    pub intercept: f64,
    /// Fitted value at the first day of the series
    pub start_value: f64,
    /// Fitted value at the last day of the series
    pub end_value: f64,
}

impl LinearTrend {
    /// Evaluate the fitted line on a given day
    pub fn value_at(&self, day: NaiveDate) -> f64 {
        let x = (day - self.origin).num_days() as f64;
        self.intercept + self.slope_per_day * x
    }

    /// Slope expressed per week
    pub fn slope_per_week(&self) -> f64 {
        self.slope_per_day * 7.0
    }
}

/// Estimated 1RM series plus its regression line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub exercise: String,
    /// First day included in the window
    pub window_start: NaiveDate,
    pub window_weeks: u32,
    /// Per-day maxima, oldest first
    pub points: Vec<TrendPoint>,
    /// Absent when fewer than two distinct days are available
    pub regression: Option<LinearTrend>,
}
