pub mod outcome;
pub mod reasoning;
pub mod scoring;

pub use outcome::{AnalysisOutcome, MatchResult, Suggestion};
pub use reasoning::generate_reasoning;
pub use scoring::{evaluate_rule, score_rule, ScoreBreakdown};

use crate::catalog::RuleCatalog;
use crate::model::SymptomRecord;
use crate::rules::schema::RuleDef;
use std::sync::Arc;

/// Maximum number of suggestions in an outcome.
pub const MAX_SUGGESTIONS: usize = 3;

pub const NO_SYMPTOMS_REASONING: &str = "No symptoms provided for analysis";

/// Scores symptom batches against a shared rule catalog.
///
/// Build one at startup and hand it to whatever serves requests. Each call
/// evaluates against a single catalog snapshot, so a concurrent reload never
/// produces a mixed result.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    catalog: Arc<RuleCatalog>,
}

impl SuggestionEngine {
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Analyze a batch against the current catalog snapshot.
    pub fn analyze(&self, records: &[SymptomRecord]) -> AnalysisOutcome {
        if records.is_empty() {
            return empty_outcome();
        }
        let rules = self.catalog.get_all();
        analyze_rules(&rules, records)
    }

    /// Every matching rule, ranked, with its score breakdown.
    pub fn explain(&self, records: &[SymptomRecord]) -> Vec<MatchResult> {
        let rules = self.catalog.get_all();
        match_rules(&rules, records)
    }
}

/// Analyze a batch against an explicit rule list.
pub fn analyze_rules(rules: &[RuleDef], records: &[SymptomRecord]) -> AnalysisOutcome {
    if records.is_empty() {
        return empty_outcome();
    }

    let matches = match_rules(rules, records);
    let reasoning = generate_reasoning(records, &matches);
    let confidence = matches
        .first()
        .map(MatchResult::rounded_confidence)
        .unwrap_or(0);
    let suggestions: Vec<Suggestion> = matches
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(Suggestion::from)
        .collect();

    tracing::debug!(
        records = records.len(),
        rules = rules.len(),
        matches = matches.len(),
        top = suggestions.first().map(|s| s.rule_id.as_str()),
        confidence,
        "symptom analysis complete"
    );

    AnalysisOutcome {
        suggestions,
        confidence,
        reasoning,
    }
}

/// Score every rule and return the matches ranked by `score * confidence`,
/// best first. Equal ranks keep catalog order.
pub fn match_rules(rules: &[RuleDef], records: &[SymptomRecord]) -> Vec<MatchResult> {
    let mut matches: Vec<MatchResult> = rules
        .iter()
        .filter_map(|rule| {
            let breakdown = score_rule(rule, records);
            (breakdown.total() > 0.0).then(|| MatchResult::new(rule.clone(), breakdown))
        })
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| b.rank().total_cmp(&a.rank()));
    matches
}

fn empty_outcome() -> AnalysisOutcome {
    AnalysisOutcome {
        suggestions: Vec::new(),
        confidence: 0,
        reasoning: NO_SYMPTOMS_REASONING.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DurationUnit, SymptomDuration, Urgency};
    use crate::rules::schema::{
        Conditions, DurationCondition, SeverityCondition, SuggestionDef, TemperatureCondition,
    };

    fn rule(id: &str, keyword: &str, confidence: f64, urgency: Urgency) -> RuleDef {
        RuleDef {
            id: id.into(),
            name: format!("Rule {id}"),
            conditions: Conditions {
                symptoms: Some(vec![keyword.into()]),
                ..Default::default()
            },
            suggestions: SuggestionDef {
                urgency,
                action: format!("Action {id}"),
                reasoning: format!("Reasoning {id}."),
                confidence,
                next_steps: vec![format!("Step {id}")],
            },
        }
    }

    fn record(name: &str, severity: u8) -> SymptomRecord {
        SymptomRecord::new(name, severity, SymptomDuration::new(1.0, DurationUnit::Days))
    }

    #[test]
    fn test_empty_batch() {
        let outcome = analyze_rules(&[rule("a", "cough", 50.0, Urgency::Mild)], &[]);
        assert!(outcome.suggestions.is_empty());
        assert_eq!(outcome.confidence, 0);
        assert_eq!(outcome.reasoning, NO_SYMPTOMS_REASONING);
    }

    #[test]
    fn test_no_match_outcome() {
        let outcome = analyze_rules(
            &[rule("a", "cough", 50.0, Urgency::Mild)],
            &[record("rash", 3)],
        );
        assert!(!outcome.has_matches());
        assert_eq!(outcome.confidence, 0);
        assert_eq!(outcome.reasoning, reasoning::NO_MATCH_REASONING);
    }

    #[test]
    fn test_ungated_rule_with_no_satisfied_predicate_is_excluded() {
        let mut ungated = rule("ungated", "", 90.0, Urgency::Urgent);
        ungated.conditions = Conditions {
            severity: Some(SeverityCondition {
                min: Some(8.0),
                ..Default::default()
            }),
            duration: Some(DurationCondition {
                min: None,
                max: Some(1.0),
                unit: DurationUnit::Hours,
            }),
            temperature: Some(TemperatureCondition {
                min: Some(101.0),
                max: None,
            }),
            ..Default::default()
        };
        let batch = [record("rash", 3).with_temperature(98.6)];

        assert!(match_rules(std::slice::from_ref(&ungated), &batch).is_empty());
        let outcome = analyze_rules(&[ungated], &batch);
        assert!(!outcome.has_matches());
        assert_eq!(outcome.confidence, 0);
    }

    #[test]
    fn test_zero_confidence_match_is_still_emitted() {
        let outcome = analyze_rules(
            &[rule("silent", "cough", 0.0, Urgency::Routine)],
            &[record("cough", 3)],
        );
        assert!(outcome.has_matches());
        assert_eq!(outcome.suggestions[0].rule_id, "silent");
        assert_eq!(outcome.suggestions[0].confidence, 0);
        assert_eq!(outcome.confidence, 0);
        assert!(outcome.reasoning.ends_with("Reasoning silent."));
    }

    #[test]
    fn test_confidence_scaled_by_score() {
        // Gate only: score 30, confidence 80 * 0.3 = 24
        let outcome = analyze_rules(
            &[rule("a", "cough", 80.0, Urgency::Mild)],
            &[record("cough", 3)],
        );
        assert_eq!(outcome.confidence, 24);
        assert_eq!(outcome.suggestions[0].confidence, 24);
        assert_eq!(outcome.suggestions[0].rule_name, "Rule a");
        assert_eq!(outcome.suggestions[0].next_steps, vec!["Step a"]);
    }

    #[test]
    fn test_truncates_to_three() {
        let rules: Vec<RuleDef> = (0..5)
            .map(|i| rule(&format!("r{i}"), "cough", 50.0, Urgency::Mild))
            .collect();
        let outcome = analyze_rules(&rules, &[record("cough", 3)]);
        assert_eq!(outcome.suggestions.len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let rules = vec![
            rule("first", "cough", 50.0, Urgency::Mild),
            rule("second", "cough", 50.0, Urgency::Mild),
            rule("third", "cough", 50.0, Urgency::Mild),
        ];
        let ids: Vec<_> = match_rules(&rules, &[record("cough", 3)])
            .into_iter()
            .map(|m| m.rule.id)
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_ranked_by_score_times_confidence() {
        let mut strong = rule("strong", "cough", 60.0, Urgency::Urgent);
        strong.conditions.severity = Some(SeverityCondition {
            min: Some(5.0),
            ..Default::default()
        });
        let rules = vec![rule("weak", "cough", 90.0, Urgency::Mild), strong];
        // weak: 30 * 27 = 810; strong: 55 * 33 = 1815
        let outcome = analyze_rules(&rules, &[record("cough", 7)]);
        assert_eq!(outcome.suggestions[0].rule_id, "strong");
        assert_eq!(outcome.suggestions[1].rule_id, "weak");
        assert_eq!(outcome.confidence, 33);
    }

    #[test]
    fn test_reasoning_uses_top_match() {
        let outcome = analyze_rules(
            &[rule("a", "cough", 80.0, Urgency::Mild)],
            &[record("Cough", 4), record("rash", 2)],
        );
        assert!(outcome.reasoning.contains("Cough, rash"));
        assert!(outcome.reasoning.contains("4/10"));
        assert!(outcome.reasoning.ends_with("Reasoning a."));
    }

    #[test]
    fn test_engine_uses_catalog() {
        let catalog = RuleCatalog::from_rules(vec![rule("a", "cough", 80.0, Urgency::Mild)]).unwrap();
        let engine = SuggestionEngine::new(Arc::new(catalog));
        assert_eq!(engine.analyze(&[record("cough", 3)]).suggestions.len(), 1);

        engine
            .catalog()
            .add(rule("b", "cough", 80.0, Urgency::Mild))
            .unwrap();
        assert_eq!(engine.explain(&[record("cough", 3)]).len(), 2);
    }
}
