use crate::engine::outcome::MatchResult;
use crate::model::SymptomRecord;

pub const NO_MATCH_REASONING: &str = "No specific patterns were identified in your symptoms. \
Continue monitoring how you feel and consult a healthcare provider if symptoms persist or worsen.";

/// Build the outcome's reasoning text.
///
/// The sentence always names the analyzed symptoms and their peak severity;
/// only the advisory part is taken from the best match.
pub fn generate_reasoning(records: &[SymptomRecord], matches: &[MatchResult]) -> String {
    let Some(top) = matches.first() else {
        return NO_MATCH_REASONING.to_string();
    };

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    let max_severity = records.iter().map(|r| r.severity).max().unwrap_or(0);

    format!(
        "Based on your reported symptoms ({}) with a maximum severity of {}/10: {}",
        names.join(", "),
        max_severity,
        top.rule.suggestions.reasoning
    )
}
