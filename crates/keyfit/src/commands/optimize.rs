//! Optimize command: re-analyze edited copy and report keyword coverage.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use keyfit_core::markdown;
use keyfit_core::{AnalysisResult, Config, CoverageReport, RuleSet};

use super::{check_missing, non_empty_keywords, print_coverage, read_analysis, read_input_file};

/// Arguments for the `optimize` subcommand.
#[derive(Args, Debug)]
pub struct OptimizeArgs {
    /// Edited copy to analyze (`.md` files are stripped to prose).
    pub file: Utf8PathBuf,

    /// Target keywords (comma-separated). Overrides rules and config.
    #[arg(short, long, value_delimiter = ',')]
    pub keywords: Option<Vec<String>>,

    /// Earlier analysis result (JSON) whose entities, concepts and
    /// categories carry over.
    #[arg(long, value_name = "RESULT")]
    pub source: Option<Utf8PathBuf>,

    /// Exit with an error when any target keyword is missing.
    #[arg(long)]
    pub fail_on_missing: bool,
}

#[derive(Serialize)]
struct OptimizeReport {
    file: String,
    result: AnalysisResult,
    coverage: CoverageReport,
}

/// Pick the target keywords: command line, then path rules, then config.
fn resolve_targets(args: &OptimizeArgs, config: &Config) -> Option<Vec<String>> {
    if let Some(ref keywords) = args.keywords {
        return non_empty_keywords(keywords);
    }
    if let Some(ref rules) = config.rules {
        let from_rules = RuleSet::compile(rules).resolve(args.file.as_str());
        if !from_rules.is_empty() {
            return Some(from_rules);
        }
    }
    config
        .target_keywords
        .as_deref()
        .and_then(non_empty_keywords)
}

/// Re-analyze an edited file and classify its target keywords.
#[instrument(name = "cmd_optimize", skip_all, fields(file = %args.file))]
pub fn cmd_optimize(
    args: OptimizeArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let Some(targets) = resolve_targets(&args, config) else {
        bail!(
            "no target keywords for {}: pass --keywords, or configure rules or target_keywords",
            args.file
        );
    };
    debug!(file = %args.file, targets = ?targets, "executing optimize command");

    let content = read_input_file(&args.file, max_input)?;
    let content = if args.file.extension() == Some("md") {
        markdown::strip_to_prose(&content)
    } else {
        content
    };

    let source = match args.source {
        Some(ref path) => read_analysis(path, max_input)?,
        None => AnalysisResult::default(),
    };

    let analyzer = config.analyzer().context("invalid priority token configuration")?;
    let classifier = config.classifier().context("invalid priority token configuration")?;
    let result = analyzer.analyze_edit(&source, content.trim(), &targets);
    let coverage = classifier.coverage(&targets, Some(&result));

    if global_json {
        let report = OptimizeReport {
            file: args.file.to_string(),
            result,
            coverage,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        if args.fail_on_missing {
            check_missing(&report.coverage)?;
        }
        return Ok(());
    }

    println!("{}", args.file.bold());
    print_coverage(&coverage);
    if args.fail_on_missing {
        check_missing(&coverage)?;
    }
    Ok(())
}
