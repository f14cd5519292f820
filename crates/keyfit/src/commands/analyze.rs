//! Analyze command: mock text-analytics result for a file.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use keyfit_core::{AnalysisResult, Config, Feature, Features};

use super::read_input_file;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze (`.md` files are stripped to prose).
    pub file: Utf8PathBuf,

    /// Features to compute (comma-separated). Omit for the configured set.
    #[arg(long, value_enum, value_delimiter = ',')]
    pub features: Option<Vec<Feature>>,

    /// Maximum keyword entries.
    #[arg(long, value_name = "N")]
    pub max_keywords: Option<usize>,

    /// Maximum entities.
    #[arg(long, value_name = "N")]
    pub max_entities: Option<usize>,

    /// Maximum concepts.
    #[arg(long, value_name = "N")]
    pub max_concepts: Option<usize>,

    /// Maximum categories.
    #[arg(long, value_name = "N")]
    pub max_categories: Option<usize>,

    /// Strip markdown regardless of the file extension.
    #[arg(long)]
    pub markdown: bool,
}

impl AnalyzeArgs {
    /// Apply the command-line selection and limits on top of `base`.
    fn features(&self, base: Features) -> Features {
        let mut features = match self.features {
            Some(ref selected) => base.only(selected),
            None => base,
        };
        let limits = &mut features.limits;
        if let Some(n) = self.max_keywords {
            limits.keywords = n;
        }
        if let Some(n) = self.max_entities {
            limits.entities = n;
        }
        if let Some(n) = self.max_concepts {
            limits.concepts = n;
        }
        if let Some(n) = self.max_categories {
            limits.categories = n;
        }
        features
    }
}

/// Build a mock analysis of a file.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, features = ?args.features, "executing analyze command");

    let content = read_input_file(&args.file, max_input)?;
    let strip_md = args.markdown || args.file.extension() == Some("md");
    let features = args.features(config.features);

    let analyzer = config.analyzer().context("invalid priority token configuration")?;
    let result = analyzer
        .analyze_text(&content, strip_md, &features)
        .with_context(|| format!("failed to analyze {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", args.file.bold());
    print_result(&result, &features);
    Ok(())
}

/// Text rendering of a result, one section per enabled feature.
pub fn print_result(result: &AnalysisResult, features: &Features) {
    if features.keywords {
        println!("\n  {}", "Keywords:".cyan());
        for k in result.keyword_entries() {
            println!("    {:.2}  {} {}", k.relevance, k.text, format!("x{}", k.count).dimmed());
        }
    }

    if features.entities {
        println!("\n  {}", "Entities:".cyan());
        for e in result.entity_entries() {
            println!(
                "    {:.2}  {} {}",
                e.relevance,
                e.text,
                format!("[{}]", e.entity_type).dimmed()
            );
        }
    }

    if features.concepts && !result.concepts.is_empty() {
        println!("\n  {}", "Concepts:".cyan());
        for c in &result.concepts {
            println!("    {:.2}  {}", c.relevance, c.text);
        }
    }

    if features.categories && !result.categories.is_empty() {
        println!("\n  {}", "Categories:".cyan());
        for c in &result.categories {
            println!("    {:.2}  {}", c.score, c.label);
        }
    }
}
