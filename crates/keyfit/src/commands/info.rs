//! Info command implementation

use clap::Args;
use keyfit_core::config::{Config, ConfigSources};
use keyfit_core::priority::{DEFAULT_PRIORITY_ENTITY_TYPE, DEFAULT_PRIORITY_TOKENS};
use keyfit_core::matching::DEFAULT_TOP_POSITIONS;
use keyfit_core::mock::DEFAULT_MAX_KEYWORDS;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    homepage: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            homepage: env!("CARGO_PKG_HOMEPAGE"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

/// Effective settings, with defaults filled in.
#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    priority_tokens: Vec<String>,
    priority_entity_type: String,
    top_positions: usize,
    max_keywords: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    target_keywords: Vec<String>,
    features: Vec<String>,
    rules: usize,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(ToString::to_string),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(ToString::to_string),
            priority_tokens: config.priority_tokens.clone().unwrap_or_else(|| {
                DEFAULT_PRIORITY_TOKENS
                    .iter()
                    .map(|t| (*t).to_string())
                    .collect()
            }),
            priority_entity_type: config
                .priority_entity_type
                .clone()
                .unwrap_or_else(|| DEFAULT_PRIORITY_ENTITY_TYPE.to_string()),
            top_positions: config.top_positions.unwrap_or(DEFAULT_TOP_POSITIONS),
            max_keywords: config
                .max_keywords
                .map_or(DEFAULT_MAX_KEYWORDS, |n| n.min(DEFAULT_MAX_KEYWORDS)),
            target_keywords: config.target_keywords.clone().unwrap_or_default(),
            features: config
                .features
                .enabled()
                .iter()
                .map(ToString::to_string)
                .collect(),
            rules: config.rules.as_ref().map_or(0, Vec::len),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let package = &full_info.package;
    println!("{} {}", package.name.bold(), package.version.green());
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), package.license);
    }
    if !package.repository.is_empty() {
        println!("{}: {}", "Repository".dimmed(), package.repository.cyan());
    }

    let cfg = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    match cfg.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    println!("{}: {}", "Log level".dimmed(), cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }

    println!();
    println!("{}", "Analysis".bold().underline());
    println!(
        "{}: {} ({})",
        "Priority tokens".dimmed(),
        cfg.priority_tokens.join(", "),
        cfg.priority_entity_type
    );
    println!("{}: {}", "Top positions".dimmed(), cfg.top_positions);
    println!("{}: {}", "Max keywords".dimmed(), cfg.max_keywords);
    println!("{}: {}", "Features".dimmed(), cfg.features.join(", "));
    if cfg.target_keywords.is_empty() {
        println!("{}: {}", "Target keywords".dimmed(), "(not set)".dimmed());
    } else {
        println!("{}: {}", "Target keywords".dimmed(), cfg.target_keywords.join(", "));
    }
    println!("{}: {}", "Rules".dimmed(), cfg.rules);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_info_text_succeeds() {
        let result = cmd_info(
            InfoArgs::default(),
            false,
            &Config::default(),
            &ConfigSources::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        let result = cmd_info(
            InfoArgs::default(),
            true,
            &Config::default(),
            &ConfigSources::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_info_fills_defaults() {
        let info = ConfigInfo::from_config(&Config::default(), &ConfigSources::default());
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.priority_tokens, vec!["bra"]);
        assert_eq!(info.priority_entity_type, "ProductType");
        assert_eq!(info.top_positions, 10);
        assert_eq!(info.max_keywords, 15);
        assert_eq!(
            info.features,
            vec!["keywords", "entities", "concepts", "categories"]
        );
        assert_eq!(info.rules, 0);
    }
}
