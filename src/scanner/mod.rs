//! Scanner module for directory traversal and file digesting.
//!
//! This module provides functionality for:
//! - Sequential directory walking using walkdir, ordered by modification time
//! - Streaming MD5 / SHA-1 / SHA3-256 digests over a single read of each file
//! - Building immutable [`FileRecord`] values from walked entries
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: Triple-digest streaming hasher
//! - [`record`]: The per-file record and its factory
//!
//! # Example
//!
//! ```no_run
//! use hashdupe::scanner::{FileRecord, Hasher, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! let hasher = Hasher::default();
//!
//! for entry in walker.walk().unwrap() {
//!     let record = FileRecord::build(&entry, &hasher).unwrap();
//!     println!("{} {}", record.digests.sha3_256, record.path.display());
//! }
//! ```

pub mod hasher;
pub mod record;
pub mod walker;

use std::path::PathBuf;
use std::time::SystemTime;

// Re-export main types
pub use hasher::{FileDigests, Hasher, DEFAULT_CHUNK_SIZE};
pub use record::{format_timestamp, FileRecord};
pub use walker::Walker;

/// Metadata for a discovered file.
///
/// Produced by the [`Walker`] before any content is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path as walked (the root joined with the relative components)
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
}

impl FileEntry {
    /// Create a new FileEntry.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, modified: SystemTime) -> Self {
        Self {
            path,
            size,
            modified,
        }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Descend into symbolic links that point at directories.
    /// Warning: May cause infinite loops with symlink cycles.
    ///
    /// Symlinks to regular files are always included, whatever this is set to.
    pub follow_symlinks: bool,
}

impl WalkerConfig {
    /// Set whether symlinked directories are descended into.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while traversing the tree.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while digesting a file.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while reading `path`.
    #[must_use]
    pub fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}
