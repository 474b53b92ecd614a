//! Duplicate finder: walk, digest, group.
//!
//! # Overview
//!
//! [`DuplicateFinder`] runs the whole pipeline for one root directory:
//! 1. **Walk** - collect regular files in modification-time order
//!    ([`Walker`])
//! 2. **Digest** - build a [`FileRecord`] per file, one read per file
//! 3. **Group** - accumulate records into [`HashGroups`] by SHA3-256
//!
//! Any error aborts the run; there is no partial result.
//!
//! # Example
//!
//! ```no_run
//! use hashdupe::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_chunk_size(1 << 20));
//! let (groups, summary) = finder.find_duplicates(Path::new("./sample-data")).unwrap();
//!
//! println!("{} files, {} hashes", summary.total_files, summary.distinct_hashes);
//! for group in groups.duplicate_groups() {
//!     println!("{} has {} duplicate(s)", group.digest, group.duplicate_count());
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytesize::ByteSize;
use rayon::prelude::*;

use super::HashGroups;
use crate::progress::ProgressCallback;
use crate::scanner::{
    FileEntry, FileRecord, HashError, Hasher, ScanError, Walker, WalkerConfig,
    DEFAULT_CHUNK_SIZE,
};

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Read chunk size for digesting, in bytes.
    pub chunk_size: usize,
    /// Number of digest threads. 1 digests files one at a time.
    pub io_threads: usize,
    /// Walker configuration for directory traversal.
    pub walker_config: WalkerConfig,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("chunk_size", &self.chunk_size)
            .field("io_threads", &self.io_threads)
            .field("walker_config", &self.walker_config)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            io_threads: 1,
            walker_config: WalkerConfig::default(),
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the read chunk size (clamped to at least one byte).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Set the number of digest threads (clamped to at least one).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Total number of files scanned
    pub total_files: usize,
    /// Total size of all scanned files in bytes
    pub total_size: u64,
    /// Number of distinct SHA3-256 digests
    pub distinct_hashes: usize,
    /// Number of groups with 2+ files
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding originals)
    pub duplicate_files: usize,
    /// Total space that can be reclaimed by removing duplicates
    pub reclaimable_space: u64,
    /// Duration of the entire scan
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Check whether any file was flagged as a duplicate.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.total_files != self.distinct_hashes
    }

    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_space).to_string()
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A file could not be opened or read while digesting.
    #[error("Failed to read file: {0}")]
    FileRead(#[from] HashError),

    /// The directory tree could not be traversed.
    #[error(transparent)]
    Scan(ScanError),
}

impl From<ScanError> for FinderError {
    fn from(error: ScanError) -> Self {
        match error {
            ScanError::NotFound(path) => Self::PathNotFound(path),
            ScanError::NotADirectory(path) => Self::NotADirectory(path),
            other => Self::Scan(other),
        }
    }
}

impl FinderError {
    /// Whether the root directory itself was rejected.
    #[must_use]
    pub fn is_invalid_root(&self) -> bool {
        matches!(self, Self::PathNotFound(_) | Self::NotADirectory(_))
    }
}

/// Duplicate finder that orchestrates walking, digesting and grouping.
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::new(config.chunk_size);
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find all duplicate files under `path`.
    ///
    /// # Errors
    ///
    /// - [`FinderError::PathNotFound`] / [`FinderError::NotADirectory`]
    ///   for an invalid root
    /// - [`FinderError::Scan`] if traversal fails
    /// - [`FinderError::FileRead`] if any file cannot be digested
    pub fn find_duplicates(&self, path: &Path) -> Result<(HashGroups, ScanSummary), FinderError> {
        let start_time = Instant::now();
        log::info!("Starting duplicate scan of {}", path.display());

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("walking", 0);
        }
        let walker = Walker::new(path, self.config.walker_config.clone());
        let walked = walker.walk();
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("walking");
        }
        let files = walked?;

        let total_size: u64 = files.iter().map(|f| f.size).sum();
        log::info!(
            "Found {} files ({} total)",
            files.len(),
            ByteSize::b(total_size)
        );

        let records = self.digest_files(&files)?;
        let groups = HashGroups::from_records(records);
        let stats = groups.stats();

        let summary = ScanSummary {
            total_files: stats.total_files,
            total_size: stats.total_size,
            distinct_hashes: stats.distinct_hashes,
            duplicate_groups: stats.duplicate_groups,
            duplicate_files: stats.duplicate_files,
            reclaimable_space: stats.reclaimable_space,
            scan_duration: start_time.elapsed(),
        };

        log::info!(
            "Scan complete: {} duplicate groups, {} duplicate files, {} reclaimable in {:.2?}",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display(),
            summary.scan_duration
        );

        Ok((groups, summary))
    }

    /// Digest walked files, returning records in the same order.
    ///
    /// # Errors
    ///
    /// Returns the first [`HashError`] encountered (in walk order when
    /// digesting sequentially).
    pub fn digest_files(&self, files: &[FileEntry]) -> Result<Vec<FileRecord>, FinderError> {
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("digesting", files.len());
        }

        let result = if self.config.io_threads > 1 && files.len() > 1 {
            self.digest_parallel(files)
        } else {
            self.digest_sequential(files)
        };

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("digesting");
        }

        if let Err(ref e) = result {
            log::debug!("Aborting scan: {}", e);
        }
        result.map_err(FinderError::from)
    }

    fn digest_sequential(&self, files: &[FileEntry]) -> Result<Vec<FileRecord>, HashError> {
        let mut records = Vec::with_capacity(files.len());
        for (idx, file) in files.iter().enumerate() {
            records.push(self.digest_one(file, idx + 1)?);
        }
        Ok(records)
    }

    fn digest_parallel(&self, files: &[FileEntry]) -> Result<Vec<FileRecord>, HashError> {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads)
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                log::warn!(
                    "Failed to create digest thread pool, digesting sequentially: {}",
                    e
                );
                return self.digest_sequential(files);
            }
        };

        log::debug!(
            "Digesting {} files on {} threads",
            files.len(),
            self.config.io_threads
        );

        let completed = AtomicUsize::new(0);
        // Indexed collect keeps walk order whatever the completion order.
        pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    self.digest_one(file, done)
                })
                .collect()
        })
    }

    fn digest_one(&self, file: &FileEntry, done: usize) -> Result<FileRecord, HashError> {
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_progress(done, file.path.to_string_lossy().as_ref());
        }

        let record = FileRecord::build(file, &self.hasher)?;

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_item_completed(record.size);
        }
        Ok(record)
    }
}
