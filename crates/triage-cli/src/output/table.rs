use triage_core::engine::MatchResult;
use triage_core::report::AnalysisReport;
use triage_core::CatalogOrigin;

pub fn print(report: &AnalysisReport, matches: Option<&[MatchResult]>, origin: &CatalogOrigin) {
    let outcome = &report.outcome;

    println!(
        "=== Symptom analysis ({}) ===\n",
        report.analysis_date.format("%Y-%m-%d %H:%M UTC")
    );

    if report.analyzed_symptoms.is_empty() {
        println!("  No symptoms selected.\n");
    } else {
        let max_name = report
            .analyzed_symptoms
            .iter()
            .map(|s| s.name.len())
            .max()
            .unwrap_or(10);
        println!("  Analyzed:");
        for s in &report.analyzed_symptoms {
            let id = s.id.as_deref().map(|id| format!("  [{id}]")).unwrap_or_default();
            println!(
                "    {:<width$}  severity {:>2}/10{}",
                s.name,
                s.severity,
                id,
                width = max_name
            );
        }
        println!();
    }

    println!("  Overall confidence: {}%", outcome.confidence);
    println!("  {}\n", outcome.reasoning);

    for (i, s) in outcome.suggestions.iter().enumerate() {
        println!(
            "  {}. [{}] {} ({}% confidence)",
            i + 1,
            s.urgency.to_string().to_uppercase(),
            s.rule_name,
            s.confidence
        );
        println!("     {}", s.action);
        for step in &s.next_steps {
            println!("       - {}", step);
        }
        println!();
    }

    if let Some(matches) = matches {
        print_matches(matches, origin);
    }

    println!("  {}", report.disclaimer);
}

fn print_matches(matches: &[MatchResult], origin: &CatalogOrigin) {
    println!("  Rule matches ({}):", origin);
    if matches.is_empty() {
        println!("    none\n");
        return;
    }

    let max_id = matches.iter().map(|m| m.rule.id.len()).max().unwrap_or(10);
    for m in matches {
        let b = &m.breakdown;
        println!(
            "    {:<width$}  score {:>5.1}  confidence {:>5.1}",
            m.rule.id,
            m.score,
            m.confidence,
            width = max_id
        );
        println!(
            "    {:<width$}  symptoms {:.1}, severity {:.1}, duration {:.1}, temperature {:.1}, associated {:.1}",
            "",
            b.symptoms,
            b.severity,
            b.duration,
            b.temperature,
            b.associated_symptoms,
            width = max_id
        );
    }
    println!();
}
