mod commands;
mod output;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "triage",
    version,
    about = "Rule-based suggestions for logged health symptoms"
)]
struct Cli {
    /// JSON rule catalog (falls back to the built-in catalog if missing or invalid)
    #[arg(short, long = "rules", value_name = "FILE", env = "TRIAGE_RULES", global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze logged symptom records and print suggestions
    Analyze {
        /// Path to a JSON array of symptom records
        input_file: PathBuf,

        /// Which records to analyze (default: every record in the file)
        #[arg(short, long, value_enum)]
        select: Option<Selection>,

        /// Record id to analyze (repeatable, used with --select ids)
        #[arg(long = "id", value_name = "ID", required_if_eq("select", "ids"))]
        ids: Vec<String>,

        /// Reference time for windowed selection and the report date (RFC 3339)
        #[arg(long, value_name = "TIME")]
        as_of: Option<DateTime<Utc>>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show every matching rule with its score breakdown and debug logs
        #[arg(long)]
        verbose: bool,
    },
    /// Inspect rule catalogs
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Selection {
    /// Only the records named with --id
    Ids,
    /// Active or worsening records from the last 7 days
    All,
    /// Up to 5 records from the last 24 hours
    Recent,
}

#[derive(Subcommand)]
enum RulesAction {
    /// List the active rules by urgency
    List,
    /// Explain one rule's conditions and scoring
    Explain {
        /// Rule id (e.g., "cardiac-emergency")
        id: String,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom rule catalog file
    Validate {
        /// Path to JSON rule catalog
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let verbose = matches!(cli.command, Commands::Analyze { verbose: true, .. });
    init_logging(log_filter(std::env::var("TRIAGE_LOG").ok().as_deref(), verbose));

    let result = match cli.command {
        Commands::Analyze {
            input_file,
            select,
            ids,
            as_of,
            output,
            verbose,
        } => {
            let policy = select.map(|s| s.into_policy(ids));
            commands::analyze::run(
                cli.rules.as_deref(),
                &input_file,
                policy,
                as_of,
                &output,
                verbose,
            )
        }
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(cli.rules.as_deref()),
            RulesAction::Explain { id } => commands::rules::explain(cli.rules.as_deref(), &id),
            RulesAction::Schema => commands::rules::schema(),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

impl Selection {
    fn into_policy(self, ids: Vec<String>) -> triage_core::selection::SelectionPolicy {
        use triage_core::selection::SelectionPolicy;
        match self {
            Selection::Ids => SelectionPolicy::Ids(ids),
            Selection::All => SelectionPolicy::All,
            Selection::Recent => SelectionPolicy::Recent,
        }
    }
}

/// Filter directives for the subscriber. An explicit `TRIAGE_LOG` always
/// wins; otherwise `--verbose` turns on the core's debug output.
fn log_filter(env: Option<&str>, verbose: bool) -> String {
    match env {
        Some(directives) if !directives.trim().is_empty() => directives.to_string(),
        _ if verbose => "warn,triage_core=debug".to_string(),
        _ => "warn".to_string(),
    }
}

/// Logs go to stderr so JSON output on stdout stays clean. Filter with
/// `TRIAGE_LOG` (e.g. `TRIAGE_LOG=triage_core=debug`).
fn init_logging(directives: String) {
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_core_log_level() {
        assert_eq!(log_filter(None, true), "warn,triage_core=debug");
        assert_eq!(log_filter(None, false), "warn");
    }

    #[test]
    fn test_env_filter_overrides_verbose() {
        assert_eq!(log_filter(Some("triage_core=trace"), true), "triage_core=trace");
        assert_eq!(log_filter(Some("  "), true), "warn,triage_core=debug");
    }

    #[test]
    fn test_verbose_flag_parses() {
        let cli = Cli::try_parse_from(["triage", "analyze", "records.json", "--verbose"]).unwrap();
        assert!(matches!(cli.command, Commands::Analyze { verbose: true, .. }));
    }
}
