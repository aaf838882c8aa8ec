use triage_core::engine::MatchResult;
use triage_core::error::TriageError;
use triage_core::report::AnalysisReport;

pub fn print(report: &AnalysisReport, matches: Option<&[MatchResult]>) -> Result<(), TriageError> {
    let json = match matches {
        Some(matches) => serde_json::to_string_pretty(&serde_json::json!({
            "report": report,
            "matches": matches,
        }))?,
        None => serde_json::to_string_pretty(report)?,
    };
    println!("{json}");
    Ok(())
}
