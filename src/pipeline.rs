//! Pipeline orchestration
//!
//! This module provides the public API for liftlog.
//! It runs the full enrichment pipeline over a snapshot of raw set records and
//! exposes the query operations used by view and export layers.

use crate::adapter::RawSetAdapter;
use crate::classifier::Classifier;
use crate::config::{AnalyzerConfig, ExclusionFilter};
use crate::error::ComputeError;
use crate::load_ratio::LoadRatioAnalyzer;
use crate::metrics::{MetricDeriver, OneRepMaxBests};
use crate::normalizer::Normalizer;
use crate::records::PersonalBests;
use crate::sequencer::SetSequencer;
use crate::trend::TrendAnalyzer;
use crate::types::{
    AcwrOutcome, EnrichedSetRecord, RawSetRecord, TrendReport, ViewSummary, WeeklySummary,
};
use crate::weekly::WeeklyAggregator;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::debug;

/// Enrich a workout-export CSV with default settings.
///
/// # Arguments
/// * `raw_csv` - CSV text with a header row (`Date, Exercise, Reps, Weight(kg), multiplier`)
///
/// # Returns
/// Enriched set records in input order
///
/// # Example
/// ```ignore
/// let records = enrich_csv(&std::fs::read_to_string("WorkoutExport.csv")?)?;
/// ```
pub fn enrich_csv(raw_csv: &str) -> Result<Vec<EnrichedSetRecord>, ComputeError> {
    let raw = RawSetAdapter::parse_csv(raw_csv)?;
    Ok(enrich(&raw, &AnalyzerConfig::default().exclusion_filter()))
}

/// Run every per-set stage over a raw snapshot.
///
/// Pipeline stages:
/// 1. Normalizer - Parse dates, coerce numbers, drop excluded exercises
/// 2. MetricDeriver - Actual weight, volume, estimated 1RM
/// 3. PersonalBests / OneRepMaxBests - Corpus-wide bests
/// 4. Classifier - Exercise category
/// 5. SetSequencer - Set number within (day, exercise)
///
/// Bests are computed over the whole normalized corpus, so PR flags and
/// intensity do not depend on any later selection.
pub fn enrich(records: &[RawSetRecord], filter: &ExclusionFilter) -> Vec<EnrichedSetRecord> {
    // Stage 1: Normalize
    let sets = Normalizer::normalize(records, filter);
    if sets.is_empty() {
        return Vec::new();
    }

    // Stage 2: Derive load metrics
    let metrics = MetricDeriver::derive_all(&sets);

    // Stage 3: Corpus-wide bests
    let personal_bests = PersonalBests::from_sets(&sets, &metrics);
    let one_rep_max_bests = OneRepMaxBests::from_sets(&sets, &metrics);

    // Stage 4: Set numbers
    let set_numbers = SetSequencer::sequence(&sets);

    let enriched: Vec<EnrichedSetRecord> = sets
        .into_iter()
        .zip(metrics)
        .zip(set_numbers)
        .map(|((set, metric), set_number)| {
            let is_personal_record = personal_bests.is_record(&set.exercise, set.reps, &metric);
            let intensity_percent = one_rep_max_bests.intensity_percent(&set.exercise, &metric);
            let category = Classifier::classify(&set.exercise);

            EnrichedSetRecord {
                date: set.date,
                day: set.day,
                exercise: set.exercise,
                reps: set.reps,
                weight_per_unit: set.weight_per_unit,
                multiplier: set.multiplier,
                set_order: set.set_order,
                note: set.note,
                actual_weight: metric.actual_weight,
                volume: metric.volume,
                one_rep_max_estimate: metric.one_rep_max_estimate,
                is_personal_record,
                category,
                set_number,
                intensity_percent,
            }
        })
        .collect();

    debug!(
        sets = enriched.len(),
        records = enriched.iter().filter(|r| r.is_personal_record).count(),
        "enriched set log"
    );

    enriched
}

/// Headline totals for any selection of sets
pub fn summarize<'a, I>(records: I) -> ViewSummary
where
    I: IntoIterator<Item = &'a EnrichedSetRecord>,
{
    records
        .into_iter()
        .fold(ViewSummary::default(), |mut summary, record| {
            summary.total_volume += record.volume;
            summary.total_sets += 1;
            summary.heaviest_lift = summary.heaviest_lift.max(record.actual_weight);
            summary
        })
}

/// Entry point holding the analysis configuration.
///
/// The analyzer itself carries no per-run state: every call to [`Self::run`]
/// recomputes everything from the snapshot it is given.
#[derive(Debug, Clone, Default)]
pub struct LiftAnalyzer {
    config: AnalyzerConfig,
}

impl LiftAnalyzer {
    /// Create an analyzer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer from a validated configuration
    pub fn with_config(config: AnalyzerConfig) -> Result<Self, ComputeError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Replace the exercise exclusion list
    pub fn with_exclusions<S: Into<String>>(
        mut self,
        exclusions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.config.excluded_exercises = exclusions.into_iter().map(Into::into).collect();
        self
    }

    /// Change how many prior weeks feed the chronic load (minimum 1)
    pub fn with_chronic_weeks(mut self, weeks: usize) -> Self {
        self.config.acwr.chronic_weeks = weeks.max(1);
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Enrich a raw snapshot into a queryable training log
    pub fn run(&self, records: &[RawSetRecord]) -> TrainingLog {
        let enriched = enrich(records, &self.config.exclusion_filter());
        TrainingLog {
            records: enriched,
            config: self.config.clone(),
        }
    }

    /// Parse a workout-export CSV and enrich it
    pub fn run_csv(&self, raw_csv: &str) -> Result<TrainingLog, ComputeError> {
        let raw = RawSetAdapter::parse_csv(raw_csv)?;
        Ok(self.run(&raw))
    }
}

/// Sets of one exercise within a day view
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseGroup<'a> {
    pub exercise: &'a str,
    pub sets: Vec<&'a EnrichedSetRecord>,
}

/// Sets of one day within an exercise view
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<'a> {
    pub day: NaiveDate,
    pub sets: Vec<&'a EnrichedSetRecord>,
}

/// Fully enriched set collection plus the queries run against it
#[derive(Debug, Clone)]
pub struct TrainingLog {
    records: Vec<EnrichedSetRecord>,
    config: AnalyzerConfig,
}

impl TrainingLog {
    /// All enriched sets in input order
    pub fn records(&self) -> &[EnrichedSetRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EnrichedSetRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct training days, most recent first
    pub fn days(&self) -> Vec<NaiveDate> {
        let days: BTreeSet<NaiveDate> = self.records.iter().map(|r| r.day).collect();
        days.into_iter().rev().collect()
    }

    /// Distinct exercise names, sorted
    pub fn exercises(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self.records.iter().map(|r| r.exercise.as_str()).collect();
        names.into_iter().collect()
    }

    /// Sets logged on `day`
    pub fn by_day(&self, day: NaiveDate) -> Vec<&EnrichedSetRecord> {
        self.records.iter().filter(|r| r.day == day).collect()
    }

    /// Sets logged for `exercise` (exact name)
    pub fn by_exercise(&self, exercise: &str) -> Vec<&EnrichedSetRecord> {
        self.records
            .iter()
            .filter(|r| r.exercise == exercise)
            .collect()
    }

    /// A day's sets grouped by exercise, in order of first appearance
    pub fn day_view(&self, day: NaiveDate) -> Vec<ExerciseGroup<'_>> {
        let mut groups: Vec<ExerciseGroup<'_>> = Vec::new();
        for record in self.by_day(day) {
            match groups.iter_mut().find(|g| g.exercise == record.exercise) {
                Some(group) => group.sets.push(record),
                None => groups.push(ExerciseGroup {
                    exercise: record.exercise.as_str(),
                    sets: vec![record],
                }),
            }
        }
        groups
    }

    /// An exercise's sets grouped by day, most recent day first
    pub fn exercise_view(&self, exercise: &str) -> Vec<DayGroup<'_>> {
        let sets = self.by_exercise(exercise);
        let days: BTreeSet<NaiveDate> = sets.iter().map(|r| r.day).collect();

        days.into_iter()
            .rev()
            .map(|day| DayGroup {
                day,
                sets: sets.iter().copied().filter(|r| r.day == day).collect(),
            })
            .collect()
    }

    /// Totals for one day
    pub fn day_summary(&self, day: NaiveDate) -> ViewSummary {
        summarize(self.by_day(day))
    }

    /// Totals for one exercise across all days
    pub fn exercise_summary(&self, exercise: &str) -> ViewSummary {
        summarize(self.by_exercise(exercise))
    }

    /// The `last` most recent weekly summaries (all when `None`)
    pub fn weekly_summary(&self, last: Option<usize>) -> Vec<WeeklySummary> {
        WeeklyAggregator::recent(&self.records, last)
    }

    /// ACWR for the most recent week
    pub fn acwr(&self) -> AcwrOutcome {
        let weeks = WeeklyAggregator::aggregate(&self.records);
        LoadRatioAnalyzer::new(self.config.acwr.clone()).analyze(&weeks)
    }

    /// Estimated 1RM trend for `exercise` over `weeks` (configured default when `None`)
    pub fn trend(&self, exercise: &str, weeks: Option<u32>, today: NaiveDate) -> TrendReport {
        let weeks = weeks.unwrap_or(self.config.trend_weeks);
        TrendAnalyzer::analyze(&self.records, exercise, weeks, today)
    }
}
