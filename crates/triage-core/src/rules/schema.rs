use crate::model::{DurationUnit, Urgency};
use serde::{Deserialize, Serialize};

/// A named catalog document. A catalog file may also be a bare array of
/// rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub rules: Vec<RuleDef>,
}

/// A declarative rule: when `conditions` match, emit `suggestions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub conditions: Conditions,
    pub suggestions: SuggestionDef,
}

/// Predicate groups of a rule. Each group is optional; an absent group
/// contributes nothing to the score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditions {
    /// Keywords matched against record names. Gates the whole rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<TemperatureCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_symptoms: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Matches when the batch mean is within 1 of this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub unit: DurationUnit,
}

/// Degrees Fahrenheit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Payload emitted when a rule matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionDef {
    pub urgency: Urgency,
    pub action: String,
    pub reasoning: String,
    /// Base confidence, 0-100, before scaling by match score.
    pub confidence: f64,
    #[serde(default)]
    pub next_steps: Vec<String>,
}
