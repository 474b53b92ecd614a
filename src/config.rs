//! Resolved scan configuration.
//!
//! There is no configuration file. Settings come from the command line and
//! the environment (see [`Cli`]) and are resolved once into a
//! [`ScanConfig`], which builds the [`FinderConfig`] for the scan.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::FinderConfig;
use crate::progress::ProgressCallback;
use crate::scanner::{WalkerConfig, DEFAULT_CHUNK_SIZE};

/// Everything a scan needs, independent of how it was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Root directory to scan
    pub root: PathBuf,
    /// Read chunk size in bytes
    pub chunk_size: usize,
    /// Number of digest threads
    pub jobs: usize,
    /// Whether symlinked directories are descended into
    pub follow_symlinks: bool,
    /// Output format for the report
    pub output: OutputFormat,
    /// Whether the progress bar is drawn
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(crate::cli::DEFAULT_ROOT),
            chunk_size: DEFAULT_CHUNK_SIZE,
            jobs: 1,
            follow_symlinks: false,
            output: OutputFormat::Text,
            show_progress: true,
        }
    }
}

impl ScanConfig {
    /// Resolve the configuration from parsed command-line arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            root: cli.path.clone(),
            chunk_size: cli.chunk_size.max(1),
            jobs: usize::from(cli.jobs).max(1),
            follow_symlinks: cli.follow_symlinks,
            output: cli.output,
            show_progress: !cli.quiet && !cli.no_progress,
        }
    }

    /// Set the scan root.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Build the finder configuration, optionally reporting progress.
    #[must_use]
    pub fn finder_config(&self, progress: Option<Arc<dyn ProgressCallback>>) -> FinderConfig {
        let config = FinderConfig::default()
            .with_chunk_size(self.chunk_size)
            .with_io_threads(self.jobs)
            .with_walker_config(
                WalkerConfig::default().with_follow_symlinks(self.follow_symlinks),
            );

        match progress {
            Some(callback) => config.with_progress_callback(callback),
            None => config,
        }
    }
}
