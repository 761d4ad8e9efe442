//! Set log ingestion
//!
//! Parses set logs from CSV exports, JSON arrays, and NDJSON into raw set
//! records. Individual bad cells are kept as-is for the normalizer to coerce;
//! only a structurally broken document is an error.

use crate::error::ComputeError;
use crate::types::RawSetRecord;

/// Adapter for reading raw set records from text documents
pub struct RawSetAdapter;

impl RawSetAdapter {
    /// Parse CSV with a header row
    ///
    /// Accepts the workout-export headers (`Date`, `Exercise`, `Reps`,
    /// `Weight(kg)`, `multiplier`) and their snake_case equivalents. Unknown
    /// columns are ignored.
    pub fn parse_csv(text: &str) -> Result<Vec<RawSetRecord>, ComputeError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<RawSetRecord>().enumerate() {
            let record = row.map_err(|e| {
                ComputeError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Parse a JSON string containing an array of set records
    pub fn parse_array(json: &str) -> Result<Vec<RawSetRecord>, ComputeError> {
        let records: Vec<RawSetRecord> = serde_json::from_str(json)?;
        Ok(records)
    }

    /// Parse NDJSON (newline-delimited JSON) containing set records
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<RawSetRecord>, ComputeError> {
        let mut records = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<RawSetRecord>(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => {
                    return Err(ComputeError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawField;

    #[test]
    fn test_parse_export_csv() {
        let csv = "Date,Exercise,Reps,Weight(kg),multiplier,Notes\n\
                   2024-01-15 18:00:00,Dumbbell Bench Press,10,22.5,2,\n\
                   2024-01-15 18:05:00,Pull-Up,,,,bodyweight\n\
                   oops,Back Squat,five,100,1,\n";

        let records = RawSetAdapter::parse_csv(csv).unwrap();
        assert_eq!(records.len(), 3);

        let bench = &records[0];
        assert_eq!(bench.exercise, "Dumbbell Bench Press");
        assert_eq!(bench.reps.as_ref().and_then(RawField::as_number), Some(10.0));
        assert_eq!(
            bench.weight_per_unit.as_ref().and_then(RawField::as_number),
            Some(22.5)
        );
        assert_eq!(bench.multiplier.as_ref().and_then(RawField::as_number), Some(2.0));
        assert_eq!(bench.note, None);

        let pull_up = &records[1];
        assert!(pull_up.reps.is_none());
        assert!(pull_up.weight_per_unit.is_none());
        assert_eq!(pull_up.note.as_deref(), Some("bodyweight"));

        let squat = &records[2];
        assert_eq!(squat.reps.as_ref().and_then(RawField::as_number), None);
    }

    #[test]
    fn test_parse_snake_case_csv() {
        let csv = "date,exercise,reps,weight_per_unit,multiplier,set_order\n\
                   2024-01-15,Row,8,40,1,2\n";
        let records = RawSetAdapter::parse_csv(csv).unwrap();
        assert_eq!(
            records[0].set_order.as_ref().and_then(RawField::as_number),
            Some(2.0)
        );
    }

    #[test]
    fn test_parse_array() {
        let json = r#"[
            {"date": "2024-01-15", "exercise": "Deadlift", "reps": 5, "weight_per_unit": 140},
            {"date": 1705320000, "exercise": "Chin-Up", "reps": "8", "multiplier": null}
        ]"#;
        let records = RawSetAdapter::parse_array(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].date, Some(RawField::Number(1_705_320_000.0)));
        assert_eq!(records[1].reps, Some(RawField::Text("8".to_string())));
        assert!(records[1].multiplier.is_none());
    }

    #[test]
    fn test_parse_ndjson() {
        let ndjson = concat!(
            r#"{"date": "2024-01-15", "exercise": "Curl", "reps": 12, "weight_per_unit": 12.5}"#,
            "\n\n",
            r#"{"date": "2024-01-16", "exercise": "Curl", "reps": true}"#,
        );
        let records = RawSetAdapter::parse_ndjson(ndjson).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].reps.as_ref().and_then(RawField::as_number), None);
    }

    #[test]
    fn test_missing_exercise_is_error() {
        let result = RawSetAdapter::parse_ndjson(r#"{"date": "2024-01-15", "reps": 5}"#);
        assert!(matches!(result, Err(ComputeError::ParseError(_))));
    }

    #[test]
    fn test_invalid_json() {
        assert!(RawSetAdapter::parse_array("not valid json").is_err());
    }
}
