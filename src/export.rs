//! Export encoding
//!
//! Encodes enriched sets and weekly summaries into CSV and JSON documents for
//! download or hand-off to other tools.

use crate::error::ComputeError;
use crate::types::{Category, EnrichedSetRecord, WeeklySummary};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One exported set (column order is the CSV header order)
///
/// `one_rep_max_estimate` and `intensity_percent` are rounded to two decimals
/// in both CSV and JSON; the in-memory [`EnrichedSetRecord`] keeps full
/// precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow<'a> {
    pub date: NaiveDateTime,
    pub day: NaiveDate,
    pub exercise: &'a str,
    pub set_number: u32,
    pub reps: f64,
    pub weight_per_unit: f64,
    pub multiplier: u32,
    pub actual_weight: f64,
    pub volume: f64,
    pub one_rep_max_estimate: Option<f64>,
    pub intensity_percent: f64,
    pub is_personal_record: bool,
    pub category: Category,
    pub note: Option<&'a str>,
}

impl<'a> From<&'a EnrichedSetRecord> for ExportRow<'a> {
    fn from(record: &'a EnrichedSetRecord) -> Self {
        Self {
            date: record.date,
            day: record.day,
            exercise: &record.exercise,
            set_number: record.set_number,
            reps: record.reps,
            weight_per_unit: record.weight_per_unit,
            multiplier: record.multiplier,
            actual_weight: record.actual_weight,
            volume: record.volume,
            one_rep_max_estimate: record.one_rep_max_estimate.map(round2),
            intensity_percent: round2(record.intensity_percent),
            is_personal_record: record.is_personal_record,
            category: record.category,
            note: record.note.as_deref(),
        }
    }
}

/// Round to two decimals for display-oriented exports
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Encoder for set and weekly exports
pub struct SetExporter;

impl SetExporter {
    /// Enriched sets as CSV with a header row
    pub fn to_csv<'a, I>(records: I) -> Result<String, ComputeError>
    where
        I: IntoIterator<Item = &'a EnrichedSetRecord>,
    {
        write_csv(records.into_iter().map(ExportRow::from))
    }

    /// Enriched sets as a JSON array
    pub fn to_json<'a, I>(records: I, pretty: bool) -> Result<String, ComputeError>
    where
        I: IntoIterator<Item = &'a EnrichedSetRecord>,
    {
        let rows: Vec<ExportRow<'a>> = records.into_iter().map(ExportRow::from).collect();
        encode_json(&rows, pretty)
    }

    /// Weekly summaries as CSV with a header row
    pub fn weekly_to_csv(weeks: &[WeeklySummary]) -> Result<String, ComputeError> {
        write_csv(weeks.iter())
    }

    /// Weekly summaries as a JSON array
    pub fn weekly_to_json(weeks: &[WeeklySummary], pretty: bool) -> Result<String, ComputeError> {
        encode_json(weeks, pretty)
    }
}

fn write_csv<T: Serialize>(rows: impl Iterator<Item = T>) -> Result<String, ComputeError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ComputeError::EncodingError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ComputeError::EncodingError(e.to_string()))
}

fn encode_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, ComputeError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
