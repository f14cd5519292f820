//! Classify command: match tiers of target keywords against a stored result.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use keyfit_core::Config;

use super::{check_missing, non_empty_keywords, print_coverage, read_analysis};

/// Arguments for the `classify` subcommand.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Analysis result (JSON) to classify against.
    pub result: Utf8PathBuf,

    /// Target keywords (comma-separated). Defaults to `target_keywords` from config.
    #[arg(short, long, value_delimiter = ',')]
    pub keywords: Option<Vec<String>>,

    /// Exit with an error when any target keyword is missing.
    #[arg(long)]
    pub fail_on_missing: bool,
}

/// Classify target keywords against an analysis result document.
#[instrument(name = "cmd_classify", skip_all, fields(result = %args.result))]
pub fn cmd_classify(
    args: ClassifyArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let targets = args
        .keywords
        .as_deref()
        .or(config.target_keywords.as_deref())
        .and_then(non_empty_keywords);
    let Some(targets) = targets else {
        bail!("no target keywords: pass --keywords or configure target_keywords");
    };
    debug!(result = %args.result, targets = ?targets, "executing classify command");

    let result = read_analysis(&args.result, max_input)?;
    let classifier = config.classifier().context("invalid priority token configuration")?;
    let coverage = classifier.coverage(&targets, Some(&result));

    if global_json {
        println!("{}", serde_json::to_string_pretty(&coverage)?);
    } else {
        println!("{}", args.result.bold());
        print_coverage(&coverage);
    }

    if args.fail_on_missing {
        check_missing(&coverage)?;
    }
    Ok(())
}
