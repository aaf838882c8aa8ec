pub mod builtin;
pub mod schema;

use crate::error::TriageError;
use schema::{CatalogDef, RuleDef};
use std::collections::HashSet;
use std::path::Path;

/// Load a rule catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Vec<RuleDef>, TriageError> {
    let content = std::fs::read_to_string(path).map_err(|e| TriageError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_catalog(&content, path)
}

/// Parse a rule catalog from a JSON string.
pub fn parse_catalog(json: &str, source: &Path) -> Result<Vec<RuleDef>, TriageError> {
    let rules = deserialize_rules(json).map_err(|e| TriageError::CatalogLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_catalog(&rules)?;
    Ok(rules)
}

/// Parse a rule catalog from a JSON string (no file path context).
pub fn parse_catalog_str(json: &str) -> Result<Vec<RuleDef>, TriageError> {
    let rules = deserialize_rules(json)?;
    validate_catalog(&rules)?;
    Ok(rules)
}

/// Pick the top-level shape from the first token so serde reports the
/// offending field and position instead of a generic shape mismatch.
fn deserialize_rules(json: &str) -> Result<Vec<RuleDef>, serde_json::Error> {
    if json.trim_start().starts_with('[') {
        serde_json::from_str(json)
    } else {
        serde_json::from_str::<CatalogDef>(json).map(|def| def.rules)
    }
}

/// Validate that a catalog is structurally well-formed.
///
/// Keywords are not checked against anything; a rule that can never match
/// is a configuration mistake, not a load failure.
pub fn validate_catalog(rules: &[RuleDef]) -> Result<(), TriageError> {
    if rules.is_empty() {
        return Err(TriageError::CatalogInvalid("rules must not be empty".into()));
    }

    let mut seen = HashSet::new();
    for rule in rules {
        validate_rule(rule)?;
        if !seen.insert(rule.id.as_str()) {
            return Err(TriageError::CatalogInvalid(format!(
                "duplicate rule id '{}'",
                rule.id
            )));
        }
    }

    Ok(())
}

/// Validate a single rule in isolation.
pub fn validate_rule(rule: &RuleDef) -> Result<(), TriageError> {
    if rule.id.trim().is_empty() {
        return Err(TriageError::CatalogInvalid(
            "rule id must not be empty".into(),
        ));
    }

    if rule.name.trim().is_empty() {
        return Err(TriageError::CatalogInvalid(format!(
            "rule '{}' has an empty name",
            rule.id
        )));
    }

    let confidence = rule.suggestions.confidence;
    if !confidence.is_finite() || !(0.0..=100.0).contains(&confidence) {
        return Err(TriageError::CatalogInvalid(format!(
            "rule '{}' has confidence {} outside 0-100",
            rule.id, confidence
        )));
    }

    let c = &rule.conditions;
    let mut thresholds = Vec::new();
    if let Some(ref s) = c.severity {
        thresholds.extend([("severity.min", s.min), ("severity.max", s.max), ("severity.avg", s.avg)]);
    }
    if let Some(ref d) = c.duration {
        thresholds.extend([("duration.min", d.min), ("duration.max", d.max)]);
    }
    if let Some(ref t) = c.temperature {
        thresholds.extend([("temperature.min", t.min), ("temperature.max", t.max)]);
    }
    for (field, value) in thresholds {
        if let Some(v) = value {
            if !v.is_finite() {
                return Err(TriageError::CatalogInvalid(format!(
                    "rule '{}' has non-finite {}",
                    rule.id, field
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DurationUnit, Urgency};

    #[test]
    fn test_parse_document_catalog() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "rules": [
                {
                    "id": "cold",
                    "name": "Cold",
                    "conditions": {
                        "symptoms": ["cough"],
                        "duration": { "max": 10, "unit": "days" },
                        "associatedSymptoms": ["sneezing"]
                    },
                    "suggestions": {
                        "urgency": "mild",
                        "action": "Rest",
                        "reasoning": "Colds pass",
                        "confidence": 60,
                        "nextSteps": ["Drink fluids"]
                    }
                }
            ]
        }"#;
        let rules = parse_catalog_str(json).unwrap();
        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.suggestions.urgency, Urgency::Mild);
        assert_eq!(rule.suggestions.next_steps, vec!["Drink fluids"]);
        let duration = rule.conditions.duration.as_ref().unwrap();
        assert_eq!(duration.unit, DurationUnit::Days);
        assert_eq!(
            rule.conditions.associated_symptoms.as_deref(),
            Some(&["sneezing".to_string()][..])
        );
    }

    #[test]
    fn test_parse_bare_array_catalog() {
        let json = r#"[
            {
                "id": "any",
                "name": "Anything",
                "suggestions": {
                    "urgency": "routine",
                    "action": "Monitor",
                    "reasoning": "Nothing specific",
                    "confidence": 10
                }
            }
        ]"#;
        let rules = parse_catalog_str(json).unwrap();
        assert_eq!(rules[0].conditions, schema::Conditions::default());
        assert!(rules[0].suggestions.next_steps.is_empty());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(parse_catalog_str("[]").is_err());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let rule = r#"{
            "id": "dup",
            "name": "Dup",
            "suggestions": { "urgency": "mild", "action": "a", "reasoning": "r", "confidence": 50 }
        }"#;
        let json = format!("[{rule}, {rule}]");
        let err = parse_catalog_str(&json).unwrap_err();
        assert!(err.to_string().contains("duplicate rule id 'dup'"));
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        let json = r#"[{
            "id": "x",
            "name": "X",
            "suggestions": { "urgency": "mild", "action": "a", "reasoning": "r", "confidence": 150 }
        }]"#;
        assert!(matches!(
            parse_catalog_str(json),
            Err(TriageError::CatalogInvalid(_))
        ));
    }

    #[test]
    fn test_unknown_urgency_rejected() {
        let json = r#"[{
            "id": "x",
            "name": "X",
            "suggestions": { "urgency": "whenever", "action": "a", "reasoning": "r", "confidence": 50 }
        }]"#;
        assert!(matches!(parse_catalog_str(json), Err(TriageError::Json(_))));
    }

    #[test]
    fn test_document_error_names_bad_value() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "rules": [{
                "id": "x",
                "name": "X",
                "suggestions": { "urgency": "whenever", "action": "a", "reasoning": "r", "confidence": 50 }
            }]
        }"#;
        let err = parse_catalog(json, Path::new("c.json")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("c.json"));
        assert!(message.contains("whenever"));
        assert!(message.contains("line 7"));
        assert!(!message.contains("untagged"));
    }

    #[test]
    fn test_array_error_names_missing_field() {
        let json = r#"[{
            "id": "x",
            "name": "X",
            "conditions": { "duration": { "min": 3 } },
            "suggestions": { "urgency": "mild", "action": "a", "reasoning": "r", "confidence": 50 }
        }]"#;
        let err = parse_catalog_str(json).unwrap_err();
        assert!(err.to_string().contains("missing field `unit`"));
    }
}
