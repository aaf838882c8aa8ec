use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use triage_core::engine::SuggestionEngine;
use triage_core::error::TriageError;
use triage_core::selection::SelectionPolicy;
use triage_core::RuleCatalog;

use crate::output;

pub fn run(
    rules: Option<&Path>,
    input_file: &Path,
    policy: Option<SelectionPolicy>,
    as_of: Option<DateTime<Utc>>,
    output_format: &str,
    verbose: bool,
) -> Result<(), TriageError> {
    let catalog = RuleCatalog::load(rules);
    let engine = SuggestionEngine::new(Arc::new(catalog));

    let records = triage_core::records::load_records(input_file)?;
    tracing::debug!(
        path = %input_file.display(),
        records = records.len(),
        catalog = %engine.catalog().origin(),
        "loaded symptom records"
    );
    let now = as_of.unwrap_or_else(Utc::now);

    let batch = triage_core::select_batch(&records, policy.as_ref(), now);
    let report = triage_core::analyze_batch(&engine, &batch, now);
    let matches = verbose.then(|| engine.explain(&batch));

    match output_format {
        "json" => output::json::print(&report, matches.as_deref())?,
        _ => output::table::print(&report, matches.as_deref(), &engine.catalog().origin()),
    }

    Ok(())
}
