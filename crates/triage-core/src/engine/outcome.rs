use crate::engine::scoring::ScoreBreakdown;
use crate::model::Urgency;
use crate::rules::schema::RuleDef;
use serde::{Deserialize, Serialize};

/// A rule that scored above zero for a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub rule: RuleDef,
    /// How well the batch satisfied the rule's conditions, 0-100.
    pub score: f64,
    /// Rule confidence scaled by `score / 100`, capped at 100.
    pub confidence: f64,
    /// Where each point of `score` came from.
    pub breakdown: ScoreBreakdown,
}

impl MatchResult {
    pub fn new(rule: RuleDef, breakdown: ScoreBreakdown) -> Self {
        let score = breakdown.total();
        let confidence = (rule.suggestions.confidence * (score / 100.0)).min(100.0);
        Self {
            rule,
            score,
            confidence,
            breakdown,
        }
    }

    /// Ranking key: higher is better.
    pub fn rank(&self) -> f64 {
        self.score * self.confidence
    }

    pub fn rounded_confidence(&self) -> u8 {
        round_confidence(self.confidence)
    }
}

/// One ranked suggestion: the matched rule's payload with its confidence
/// replaced by the match confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub rule_id: String,
    pub rule_name: String,
    pub urgency: Urgency,
    pub action: String,
    pub reasoning: String,
    pub confidence: u8,
    pub next_steps: Vec<String>,
}

impl From<&MatchResult> for Suggestion {
    fn from(m: &MatchResult) -> Self {
        let payload = &m.rule.suggestions;
        Suggestion {
            rule_id: m.rule.id.clone(),
            rule_name: m.rule.name.clone(),
            urgency: payload.urgency,
            action: payload.action.clone(),
            reasoning: payload.reasoning.clone(),
            confidence: m.rounded_confidence(),
            next_steps: payload.next_steps.clone(),
        }
    }
}

/// Result of analyzing one symptom batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// At most three suggestions, best first.
    pub suggestions: Vec<Suggestion>,
    /// Rounded confidence of the best match, 0 when nothing matched.
    pub confidence: u8,
    pub reasoning: String,
}

impl AnalysisOutcome {
    pub fn top(&self) -> Option<&Suggestion> {
        self.suggestions.first()
    }

    pub fn has_matches(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

pub(crate) fn round_confidence(confidence: f64) -> u8 {
    confidence.round().clamp(0.0, 100.0) as u8
}
