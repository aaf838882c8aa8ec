use crate::engine::AnalysisOutcome;
use crate::model::SymptomRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DISCLAIMER: &str = "This analysis is for informational purposes only and is not a \
substitute for professional medical advice, diagnosis, or treatment. If you think you may have \
a medical emergency, call 911 immediately.";

/// Identity of an analyzed record, echoed back in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedSymptom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub severity: u8,
}

impl From<&SymptomRecord> for AnalyzedSymptom {
    fn from(r: &SymptomRecord) -> Self {
        AnalyzedSymptom {
            id: r.id.clone(),
            name: r.name.clone(),
            severity: r.severity,
        }
    }
}

/// An outcome wrapped with request metadata for output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub analysis_date: DateTime<Utc>,
    pub disclaimer: String,
    pub analyzed_symptoms: Vec<AnalyzedSymptom>,
    #[serde(flatten)]
    pub outcome: AnalysisOutcome,
}

impl AnalysisReport {
    pub fn new(
        records: &[SymptomRecord],
        outcome: AnalysisOutcome,
        analysis_date: DateTime<Utc>,
    ) -> Self {
        AnalysisReport {
            analysis_date,
            disclaimer: DISCLAIMER.to_string(),
            analyzed_symptoms: records.iter().map(AnalyzedSymptom::from).collect(),
            outcome,
        }
    }
}
