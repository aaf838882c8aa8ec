pub mod catalog;
pub mod engine;
pub mod error;
pub mod model;
pub mod records;
pub mod report;
pub mod rules;
pub mod selection;

use chrono::{DateTime, Utc};
use engine::SuggestionEngine;
use model::SymptomRecord;
use report::AnalysisReport;
use selection::SelectionPolicy;

pub use catalog::{CatalogOrigin, RuleCatalog};
pub use engine::{AnalysisOutcome, Suggestion};
pub use error::TriageError;

/// Pick the batch to analyze from logged records. With no policy every
/// record is used.
pub fn select_batch(
    records: &[SymptomRecord],
    policy: Option<&SelectionPolicy>,
    now: DateTime<Utc>,
) -> Vec<SymptomRecord> {
    let batch = match policy {
        Some(policy) => selection::select(records, policy, now),
        None => records.to_vec(),
    };

    tracing::info!(
        logged = records.len(),
        selected = batch.len(),
        policy = ?policy,
        "selected symptom batch"
    );

    batch
}

/// Main API entry point: analyze a batch and wrap the outcome in a report
/// stamped with `now`.
pub fn analyze_batch(
    engine: &SuggestionEngine,
    batch: &[SymptomRecord],
    now: DateTime<Utc>,
) -> AnalysisReport {
    let outcome = engine.analyze(batch);
    AnalysisReport::new(batch, outcome, now)
}
