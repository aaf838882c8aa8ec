use std::path::Path;
use triage_core::engine::scoring;
use triage_core::error::TriageError;
use triage_core::model::Urgency;
use triage_core::rules::schema::RuleDef;
use triage_core::RuleCatalog;

pub fn list(rules: Option<&Path>) -> Result<(), TriageError> {
    let catalog = RuleCatalog::load(rules);
    let all = catalog.get_all();

    println!("Active rules ({}):\n", catalog.origin());
    for urgency in Urgency::ALL {
        let tier: Vec<&RuleDef> = all
            .iter()
            .filter(|r| r.suggestions.urgency == urgency)
            .collect();
        if tier.is_empty() {
            continue;
        }

        println!("  {}", urgency.to_string().to_uppercase());
        let max_id = tier.iter().map(|r| r.id.len()).max().unwrap_or(10);
        for rule in tier {
            println!(
                "    {:<width$}  {} (confidence {})",
                rule.id,
                rule.name,
                rule.suggestions.confidence,
                width = max_id
            );
        }
        println!();
    }
    Ok(())
}

pub fn explain(rules: Option<&Path>, id: &str) -> Result<(), TriageError> {
    let catalog = RuleCatalog::load(rules);
    let rule = catalog
        .get(id)
        .ok_or_else(|| TriageError::UnknownRule(id.to_string()))?;

    println!("{} ({})\n", rule.name, rule.id);
    println!(
        "Suggests: [{}] {}",
        rule.suggestions.urgency.to_string().to_uppercase(),
        rule.suggestions.action
    );
    println!("Base confidence: {}\n", rule.suggestions.confidence);
    println!("{}\n", rule.suggestions.reasoning);

    println!("Conditions:\n");
    let c = &rule.conditions;

    match c.symptoms.as_deref() {
        Some(keywords) if !keywords.is_empty() => {
            println!("  Symptoms (required)   any record name matching: {}", keywords.join(", "));
            println!(
                "                        up to {} points, by fraction of keywords matched",
                scoring::SYMPTOM_WEIGHT
            );
        }
        _ => println!("  Symptoms              not gated; any batch can match"),
    }

    if let Some(ref s) = c.severity {
        if let Some(min) = s.min {
            println!(
                "  Severity              highest >= {}  (+{})",
                min,
                scoring::SEVERITY_BOUND_POINTS
            );
        }
        if let Some(max) = s.max {
            println!(
                "  Severity              highest <= {}  (+{})",
                max,
                scoring::SEVERITY_BOUND_POINTS
            );
        }
        if let Some(avg) = s.avg {
            println!(
                "  Severity              average within {} of {}  (+{})",
                scoring::SEVERITY_AVG_TOLERANCE,
                avg,
                scoring::SEVERITY_AVG_POINTS
            );
        }
    }

    if let Some(ref d) = c.duration {
        let bounds = match (d.min, d.max) {
            (Some(min), Some(max)) => format!("between {} and {} {}", min, max, d.unit),
            (Some(min), None) => format!("at least {} {}", min, d.unit),
            (None, Some(max)) => format!("at most {} {}", max, d.unit),
            (None, None) => format!("(no bounds, unit {})", d.unit),
        };
        println!(
            "  Duration              {}  (+{} per bound per record, max {})",
            bounds,
            scoring::DURATION_BOUND_POINTS,
            scoring::DURATION_CAP
        );
    }

    if let Some(ref t) = c.temperature {
        let bounds = match (t.min, t.max) {
            (Some(min), Some(max)) => format!("highest between {}°F and {}°F", min, max),
            (Some(min), None) => format!("highest >= {}°F", min),
            (None, Some(max)) => format!("highest <= {}°F", max),
            (None, None) => "(no bounds)".to_string(),
        };
        println!(
            "  Temperature           {}  (+{} per bound)",
            bounds,
            scoring::TEMPERATURE_BOUND_POINTS
        );
    }

    if let Some(ref keywords) = c.associated_symptoms {
        println!(
            "  Associated symptoms   {}  (+{} each, max {})",
            keywords.join(", "),
            scoring::ASSOCIATED_POINTS,
            scoring::ASSOCIATED_CAP
        );
    }

    if !rule.suggestions.next_steps.is_empty() {
        println!("\nNext steps:");
        for step in &rule.suggestions.next_steps {
            println!("  - {}", step);
        }
    }
    println!();

    Ok(())
}

pub fn schema() -> Result<(), TriageError> {
    print!(
        r#"JSON Rule Catalog Schema
========================

A rule catalog is a list of rules. When you run `triage analyze`, every rule
is scored against the selected symptom records; the best three matches
become suggestions.

Top level: either a bare array of rules, or an object with
  name          (string, required)  Human-readable catalog name
  description   (string, optional)  What this catalog is for
  version       (string, required)  Version identifier (e.g., "2025.1")
  rules         (array, required)   List of rules (see below), never empty

Each rule:
  id            (string, required)  Unique, stable identifier
  name          (string, required)  Display name shown with suggestions
  conditions    (object, optional)  Predicate groups, all optional:
    symptoms            keywords; at least one must match a record name
                        (case-insensitive substring, either direction)
                        or the rule cannot match at all
    severity            {{ "min", "max", "avg" }} on the 1-10 scale
    duration            {{ "min", "max", "unit" }}, unit is one of
                        minutes, hours, days, weeks, months
    temperature         {{ "min", "max" }} in degrees Fahrenheit
    associatedSymptoms  keywords matched against associated symptoms
  suggestions   (object, required)  What to suggest on a match:
    urgency             emergency, urgent, moderate, mild or routine
    action              short instruction
    reasoning           explanation quoted in the analysis reasoning
    confidence          base confidence 0-100
    nextSteps           ordered list of follow-up steps

Example:
[
  {{
    "id": "seasonal-allergy",
    "name": "Seasonal Allergies",
    "conditions": {{
      "symptoms": ["sneezing", "itchy eyes"],
      "severity": {{ "max": 4 }},
      "duration": {{ "min": 2, "unit": "days" }},
      "associatedSymptoms": ["runny nose"]
    }},
    "suggestions": {{
      "urgency": "mild",
      "action": "Try an over-the-counter antihistamine",
      "reasoning": "Recurring sneezing and itchy eyes often point to allergies.",
      "confidence": 60,
      "nextSteps": ["Limit time outdoors on high pollen days"]
    }}
  }}
]
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), TriageError> {
    let rules = triage_core::rules::load_catalog(file)?;

    println!("Rule catalog '{}' is valid.", file.display());
    println!("  Rules: {}", rules.len());

    // Potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    for urgency in Urgency::ALL {
        if !rules.iter().any(|r| r.suggestions.urgency == urgency) {
            warnings.push(format!("no rule suggests urgency '{}'", urgency));
        }
    }
    for rule in &rules {
        if rule.conditions.symptoms.as_ref().map_or(true, |k| k.is_empty()) {
            warnings.push(format!(
                "rule '{}' has no symptom keywords and can match any batch",
                rule.id
            ));
        }
        if let Some(ref d) = rule.conditions.duration {
            if !d.unit.is_recognized() {
                warnings.push(format!(
                    "rule '{}' uses unrecognized duration unit '{}'; thresholds are taken as hours",
                    rule.id, d.unit
                ));
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
