//! Logging setup for the CLI.
//!
//! Two layers share one `EnvFilter`:
//!
//! - stderr, human readable. Shows warnings and errors unless `-v` or
//!   `RUST_LOG` asks for more. stdout stays clean for command output and the
//!   MCP transport.
//! - A JSONL file written through a non-blocking `tracing-appender` writer,
//!   when a log location can be resolved.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

const LOG_PATH_ENV: &str = "KEYFIT_LOG_PATH";
const LOG_DIR_ENV: &str = "KEYFIT_LOG_DIR";
const LOG_FILE_NAME: &str = "keyfit.jsonl";

/// Dependencies that log far more than they are worth at debug level.
const NOISY_TARGETS: &[&str] = &["rmcp", "globset"];

/// Where the JSONL log goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Directory holding the log file.
    pub log_dir: Option<PathBuf>,
    /// Log file name inside `log_dir`.
    pub file_name: String,
}

impl ObservabilityConfig {
    /// Resolve the log location.
    ///
    /// `KEYFIT_LOG_PATH` names the file outright. Otherwise the directory is
    /// `KEYFIT_LOG_DIR`, then `config_log_dir`, then `<data dir>/logs`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
            keyfit_core::config::user_data_dir().map(|d| d.join("logs").into_std_path_buf()),
        )
    }

    fn resolve(
        log_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
        default_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = log_path
            && let Some(name) = path.file_name().and_then(|n| n.to_str())
        {
            let file_name = name.to_string();
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            return Self {
                log_dir: Some(dir),
                file_name,
            };
        }
        Self {
            log_dir: env_dir.or(config_dir).or(default_dir),
            file_name: LOG_FILE_NAME.to_string(),
        }
    }
}

/// Build the shared filter.
///
/// `RUST_LOG` wins when set. Otherwise `-q` means errors only, `-v` debug,
/// `-vv` trace, and no flag uses the configured level.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => default_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let mut directives = level.to_string();
    if verbose < 2 {
        for target in NOISY_TARGETS {
            directives.push_str(&format!(",{target}=warn"));
        }
    }
    EnvFilter::new(directives)
}

/// Level shown on stderr.
fn stderr_level(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        LevelFilter::ERROR
    } else if verbose > 0 || std::env::var_os("RUST_LOG").is_some() {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; hold it for the life
/// of the process. A log directory that cannot be created disables the file
/// layer with a warning instead of failing the command.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
    quiet: bool,
    verbose: u8,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(stderr_level(quiet, verbose));

    let mut dir_error = None;
    let (file_layer, guard) = match config.log_dir.as_deref() {
        Some(dir) => match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::never(dir, &config.file_name);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_ansi(false)
                    .with_writer(writer);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                dir_error = Some((dir.to_path_buf(), e));
                (None, None)
            }
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    if let Some((dir, error)) = dir_error {
        tracing::warn!(dir = %dir.display(), %error, "log directory unavailable, file logging disabled");
    }
    Ok(guard)
}
