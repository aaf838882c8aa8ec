//! Intake of symptom records from JSON.
//!
//! Missing mandatory fields are a caller bug and fail the whole batch.
//! Missing optional fields are fine and only reduce what can be scored.

use crate::error::TriageError;
use crate::model::SymptomRecord;
use std::path::Path;

pub const MIN_SEVERITY: u8 = 1;
pub const MAX_SEVERITY: u8 = 10;

/// Load symptom records from a JSON file containing an array of records.
pub fn load_records(path: &Path) -> Result<Vec<SymptomRecord>, TriageError> {
    let content = std::fs::read_to_string(path)?;
    parse_records(&content)
}

/// Parse and validate a JSON array of symptom records.
pub fn parse_records(json: &str) -> Result<Vec<SymptomRecord>, TriageError> {
    let records: Vec<SymptomRecord> =
        serde_json::from_str(json).map_err(|e| TriageError::InvalidRecord(e.to_string()))?;
    for (index, record) in records.iter().enumerate() {
        validate_record(record, index)?;
    }
    Ok(records)
}

/// Check the mandatory fields of one record.
pub fn validate_record(record: &SymptomRecord, index: usize) -> Result<(), TriageError> {
    let label = match record.id {
        Some(ref id) => format!("record {index} ('{id}')"),
        None => format!("record {index}"),
    };

    if record.name.trim().is_empty() {
        return Err(TriageError::InvalidRecord(format!(
            "{label}: name must not be empty"
        )));
    }

    if !(MIN_SEVERITY..=MAX_SEVERITY).contains(&record.severity) {
        return Err(TriageError::InvalidRecord(format!(
            "{label}: severity {} outside {MIN_SEVERITY}-{MAX_SEVERITY}",
            record.severity
        )));
    }

    let value = record.duration.value;
    if !value.is_finite() || value < 0.0 {
        return Err(TriageError::InvalidRecord(format!(
            "{label}: duration value {value} must be a non-negative number"
        )));
    }

    Ok(())
}
