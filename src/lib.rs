//! hashdupe - content-digest duplicate file finder
//!
//! Walks a directory tree in modification-time order, digests every regular
//! file with MD5, SHA-1 and SHA3-256 in a single read, groups files by
//! SHA3-256 and reports each group's earliest file as the original along
//! with POSIX and PowerShell commands that would delete the rest.
//!
//! The library exposes each stage on its own:
//!
//! - [`scanner`]: walking and digesting
//! - [`duplicates`]: grouping and the end-to-end [`DuplicateFinder`](duplicates::DuplicateFinder)
//! - [`output`]: text report, JSON and deletion commands
//!
//! [`run_app`] wires them together for the command-line binary.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;

use crate::cli::{Cli, OutputFormat};
use crate::config::ScanConfig;
use crate::duplicates::{DuplicateFinder, ScanSummary};
use crate::error::ExitCode;
use crate::output::{JsonOutput, TextReport};
use crate::progress::{Progress, ProgressCallback};

/// Run the application for parsed command-line arguments.
///
/// Initializes logging, scans the configured root and writes the report to
/// stdout. Nothing is written to stdout unless the scan completes.
///
/// # Errors
///
/// Returns an error if the scan fails or the report cannot be written. Use
/// [`ExitCode::from_error`] to pick the process exit code.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = ScanConfig::from_cli(&cli);
    logging::init_logging(cli.verbose, cli.quiet, config.show_progress);
    log::debug!("Resolved configuration: {:?}", config);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    run_scan(&config, &mut handle)?;

    Ok(ExitCode::Success)
}

/// Scan `config.root` and write the report in `config.output` format.
///
/// The report is rendered only after the whole tree has been digested, so a
/// failed scan leaves `writer` untouched.
///
/// # Errors
///
/// Returns an error if the scan fails or writing to `writer` fails.
pub fn run_scan<W: Write>(config: &ScanConfig, writer: &mut W) -> anyhow::Result<ScanSummary> {
    let progress: Option<Arc<dyn ProgressCallback>> = if config.show_progress {
        Some(Arc::new(Progress::new(false)))
    } else {
        None
    };

    let finder = DuplicateFinder::new(config.finder_config(progress));
    let (groups, summary) = finder
        .find_duplicates(&config.root)
        .with_context(|| format!("Failed to scan {}", config.root.display()))?;

    match config.output {
        OutputFormat::Text => TextReport::new(&groups)
            .write_to(writer)
            .context("Failed to write report")?,
        OutputFormat::Json => JsonOutput::new(&groups, &summary)
            .write_to(writer, true)
            .context("Failed to write JSON output")?,
    }
    writer.flush().context("Failed to flush output")?;

    Ok(summary)
}
