//! Gated additive scoring of one rule against a symptom batch.
//!
//! Every point of a score comes from exactly one predicate group, recorded
//! in a [`ScoreBreakdown`].

use crate::model::SymptomRecord;
use crate::rules::schema::{
    DurationCondition, RuleDef, SeverityCondition, TemperatureCondition,
};
use serde::{Deserialize, Serialize};

pub const SYMPTOM_WEIGHT: f64 = 30.0;
pub const SEVERITY_BOUND_POINTS: f64 = 25.0;
pub const SEVERITY_AVG_POINTS: f64 = 15.0;
pub const SEVERITY_AVG_TOLERANCE: f64 = 1.0;
pub const DURATION_BOUND_POINTS: f64 = 15.0;
pub const DURATION_CAP: f64 = 30.0;
pub const TEMPERATURE_BOUND_POINTS: f64 = 20.0;
pub const ASSOCIATED_POINTS: f64 = 10.0;
pub const ASSOCIATED_CAP: f64 = 20.0;
pub const MAX_SCORE: f64 = 100.0;

/// Per-predicate contributions to a rule's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub symptoms: f64,
    pub severity: f64,
    pub duration: f64,
    pub temperature: f64,
    pub associated_symptoms: f64,
}

impl ScoreBreakdown {
    /// Sum of all contributions, clamped to 0-100.
    pub fn total(&self) -> f64 {
        let sum = self.symptoms
            + self.severity
            + self.duration
            + self.temperature
            + self.associated_symptoms;
        sum.clamp(0.0, MAX_SCORE)
    }
}

/// Score `rule` against `records`, 0-100.
pub fn evaluate_rule(rule: &RuleDef, records: &[SymptomRecord]) -> f64 {
    score_rule(rule, records).total()
}

/// Score `rule` against `records`, keeping each predicate's contribution.
///
/// A rule whose symptom keywords match none of the record names is vetoed
/// and returns an all-zero breakdown.
pub fn score_rule(rule: &RuleDef, records: &[SymptomRecord]) -> ScoreBreakdown {
    if records.is_empty() {
        return ScoreBreakdown::default();
    }

    let conditions = &rule.conditions;
    let mut breakdown = ScoreBreakdown::default();

    if let Some(keywords) = conditions.symptoms.as_deref().filter(|k| !k.is_empty()) {
        let fraction = keyword_fraction(keywords, records.iter().map(|r| r.name.as_str()));
        if fraction == 0.0 {
            return ScoreBreakdown::default();
        }
        breakdown.symptoms = fraction * SYMPTOM_WEIGHT;
    }

    if let Some(ref severity) = conditions.severity {
        breakdown.severity = severity_points(severity, records);
    }

    if let Some(ref duration) = conditions.duration {
        breakdown.duration = duration_points(duration, records);
    }

    if let Some(ref temperature) = conditions.temperature {
        breakdown.temperature = temperature_points(temperature, records);
    }

    if let Some(ref keywords) = conditions.associated_symptoms {
        breakdown.associated_symptoms = associated_points(keywords, records);
    }

    breakdown
}

/// Case-insensitive substring containment in either direction.
///
/// Blank strings never match; otherwise they would be contained in
/// everything.
pub fn names_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

fn matches_any(keywords: &[String], name: &str) -> bool {
    keywords.iter().any(|k| names_match(k, name))
}

/// Fraction of `keywords` matching at least one of `names`. `keywords`
/// must not be empty.
fn keyword_fraction<'a>(keywords: &[String], names: impl Iterator<Item = &'a str> + Clone) -> f64 {
    let matched = keywords
        .iter()
        .filter(|k| names.clone().any(|n| names_match(k, n)))
        .count();
    matched as f64 / keywords.len() as f64
}

fn severity_points(cond: &SeverityCondition, records: &[SymptomRecord]) -> f64 {
    let max = records.iter().map(|r| r.severity).max().unwrap_or(0) as f64;
    let avg = records.iter().map(|r| r.severity as f64).sum::<f64>() / records.len() as f64;

    let mut points = 0.0;
    if cond.min.is_some_and(|min| max >= min) {
        points += SEVERITY_BOUND_POINTS;
    }
    if cond.max.is_some_and(|limit| max <= limit) {
        points += SEVERITY_BOUND_POINTS;
    }
    if cond
        .avg
        .is_some_and(|target| (avg - target).abs() <= SEVERITY_AVG_TOLERANCE)
    {
        points += SEVERITY_AVG_POINTS;
    }
    points
}

fn duration_points(cond: &DurationCondition, records: &[SymptomRecord]) -> f64 {
    let min = cond.min.map(|m| cond.unit.to_hours(m));
    let max = cond.max.map(|m| cond.unit.to_hours(m));

    let mut points = 0.0;
    for record in records {
        let hours = record.duration.hours();
        if min.is_some_and(|m| hours >= m) {
            points += DURATION_BOUND_POINTS;
        }
        if max.is_some_and(|m| hours <= m) {
            points += DURATION_BOUND_POINTS;
        }
    }
    points.min(DURATION_CAP)
}

fn temperature_points(cond: &TemperatureCondition, records: &[SymptomRecord]) -> f64 {
    let Some(max_temp) = records
        .iter()
        .filter_map(|r| r.temperature)
        .reduce(f64::max)
    else {
        return 0.0;
    };

    let mut points = 0.0;
    if cond.min.is_some_and(|min| max_temp >= min) {
        points += TEMPERATURE_BOUND_POINTS;
    }
    if cond.max.is_some_and(|limit| max_temp <= limit) {
        points += TEMPERATURE_BOUND_POINTS;
    }
    points
}

// Repeated entries are counted each time they appear.
fn associated_points(keywords: &[String], records: &[SymptomRecord]) -> f64 {
    let matches = records
        .iter()
        .flat_map(|r| r.associated_symptoms.iter())
        .filter(|a| matches_any(keywords, &a.name))
        .count();
    (matches as f64 * ASSOCIATED_POINTS).min(ASSOCIATED_CAP)
}
