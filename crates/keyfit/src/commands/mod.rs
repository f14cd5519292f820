//! Command implementations.

use anyhow::{Context, bail};
use camino::Utf8Path;
use owo_colors::OwoColorize;

use keyfit_core::{AnalysisResult, CoverageReport, MatchTier};

pub mod analyze;
pub mod classify;
pub mod info;
pub mod optimize;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Check the size before reading the whole file into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len();
        if size > max as u64 {
            bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

/// Read an analysis result document (JSON).
pub fn read_analysis(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<AnalysisResult> {
    let raw = read_input_file(path, max_bytes)?;
    serde_json::from_str(&raw).with_context(|| format!("{path} is not an analysis result"))
}

/// Trimmed, non-empty keywords, or `None` when nothing is left.
pub fn non_empty_keywords(keywords: &[String]) -> Option<Vec<String>> {
    let cleaned: Vec<String> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Print one line per target keyword, colored by tier, then the totals.
pub fn print_coverage(report: &CoverageReport) {
    for verdict in &report.keywords {
        let label = format!("{:<9}", verdict.tier.as_str());
        let label = match verdict.tier {
            MatchTier::Exact => label.green().to_string(),
            MatchTier::Partial => label.yellow().to_string(),
            MatchTier::Relevant => label.cyan().to_string(),
            MatchTier::Missing => label.red().bold().to_string(),
        };
        println!("  {label} {}", verdict.keyword);
    }
    println!(
        "\n{} {} exact, {} partial, {} relevant, {} missing",
        "Coverage:".bold(),
        report.exact,
        report.partial,
        report.relevant,
        report.missing,
    );
}

/// Fail when any keyword in `report` is missing.
pub fn check_missing(report: &CoverageReport) -> anyhow::Result<()> {
    if report.missing > 0 {
        let missing: Vec<&str> = report.missing_keywords().collect();
        bail!(
            "{} target keyword(s) missing: {}",
            report.missing,
            missing.join(", ")
        );
    }
    Ok(())
}
