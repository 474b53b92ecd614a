//! Directory walker producing files in modification-time order.
//!
//! # Overview
//!
//! [`Walker`] traverses a directory tree with [`walkdir`], collects every
//! regular file, and returns them sorted ascending by modification time.
//! The earliest file of any later duplicate group therefore comes first,
//! which is what makes it the "original".
//!
//! # Ordering
//!
//! Files with identical modification times are ordered by their walked
//! path (lexical byte order), so the result is fully deterministic for a
//! given filesystem state.
//!
//! # Symlinks
//!
//! - A symlink to a regular file is included; its mtime is the target's.
//! - A symlink to a directory is only descended into when
//!   [`WalkerConfig::follow_symlinks`] is set.
//! - Dangling symlinks, sockets, FIFOs and device nodes are skipped.
//!
//! # Example
//!
//! ```no_run
//! use hashdupe::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("./sample-data"), WalkerConfig::default());
//! for file in walker.walk().unwrap() {
//!     println!("{}: {} bytes", file.path.display(), file.size);
//! }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, ScanError, WalkerConfig};

/// Directory walker for ordered file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Check that the root exists and is a directory.
    ///
    /// # Errors
    ///
    /// [`ScanError::NotFound`] or [`ScanError::NotADirectory`] for an
    /// invalid root, [`ScanError::Io`] if it cannot be inspected.
    pub fn validate_root(&self) -> Result<(), ScanError> {
        match std::fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(ScanError::NotADirectory(self.root.clone())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ScanError::NotFound(self.root.clone()))
            }
            Err(e) => Err(ScanError::Io {
                path: self.root.clone(),
                source: e,
            }),
        }
    }

    /// Walk the directory tree and return every regular file in walk order.
    ///
    /// # Errors
    ///
    /// Fails on an invalid root or on the first traversal error (for
    /// example an unreadable subdirectory). A file that vanishes between
    /// listing and stat is skipped.
    pub fn walk(&self) -> Result<Vec<FileEntry>, ScanError> {
        self.validate_root()?;

        let walk_dir = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        let mut files = Vec::new();
        for entry in walk_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if is_not_found(&e) => {
                    // Broken link under follow_links, or removed mid-walk.
                    log::debug!("Skipping vanished path: {}", e);
                    continue;
                }
                Err(e) => return Err(self.handle_walkdir_error(e)),
            };
            let file_type = entry.file_type();

            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() && !file_type.is_symlink() {
                log::trace!("Skipping special file: {}", entry.path().display());
                continue;
            }

            if let Some(file) = self.stat_entry(entry.into_path())? {
                files.push(file);
            }
        }

        files.sort_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.path.cmp(&b.path))
        });

        log::debug!(
            "Walked {}: {} files",
            self.root.display(),
            files.len()
        );
        Ok(files)
    }

    /// Stat a listed path, following symlinks.
    ///
    /// Returns `Ok(None)` for anything that should not be scanned.
    fn stat_entry(&self, path: PathBuf) -> Result<Option<FileEntry>, ScanError> {
        let metadata = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // Dangling symlink, or the file was removed after listing.
                log::debug!("Skipping vanished or dangling path: {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(ScanError::Io { path, source: e }),
        };

        if !metadata.is_file() {
            log::trace!("Skipping non-regular file: {}", path.display());
            return Ok(None);
        }

        let modified = metadata
            .modified()
            .map_err(|e| ScanError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(Some(FileEntry::new(path, metadata.len(), modified)))
    }

    /// Convert a walkdir error into a [`ScanError`].
    fn handle_walkdir_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::warn!("Walker error for {}: {}", path.display(), error);

        let source = match error.into_io_error() {
            Some(io) => io,
            None => std::io::Error::other("filesystem loop detected"),
        };
        ScanError::Io { path, source }
    }
}

fn is_not_found(error: &walkdir::Error) -> bool {
    error
        .io_error()
        .is_some_and(|io| io.kind() == ErrorKind::NotFound)
}
