//! Logging initialization and configuration.
//!
//! Uses the `tracing` ecosystem for structured logging with support for
//! both human-readable and JSON output formats, plus an optional append-mode
//! log file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// Log output goes to stderr (stdout is reserved for data output); when
/// `log_file` is set, a plain-text copy is appended there as well. The
/// RUST_LOG environment variable can override the log level.
pub fn init(verbose: bool, json_format: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let log_file = match log_file {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };

    if json_format {
        let file_layer =
            log_file.map(|file| fmt::layer().with_ansi(false).with_writer(Arc::new(file)));
        // JSON format for machine parsing
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(file_layer)
            .init();
    } else {
        let file_layer =
            log_file.map(|file| fmt::layer().with_ansi(false).with_writer(Arc::new(file)));
        // Pretty format for humans
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .with(file_layer)
            .init();
    }

    Ok(())
}

/// Initialize logging with settings from the config file, with CLI flags
/// taking precedence.
pub fn init_from_config(
    config: &photostamp_core::Config,
    verbose_override: bool,
    json_logs_override: bool,
    log_file: Option<&Path>,
) -> anyhow::Result<()> {
    let verbose =
        verbose_override || config.logging.level == "debug" || config.logging.level == "trace";
    let json_format = json_logs_override || config.logging.format == "json";
    init(verbose, json_format, log_file)
}
