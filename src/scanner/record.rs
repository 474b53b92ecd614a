//! Per-file record produced by the digest stage.
//!
//! A [`FileRecord`] is plain data. All I/O happens in [`FileRecord::build`],
//! which reads the file through a [`Hasher`], resolves its absolute path and
//! formats its modification time. Once built, a record never changes.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Serialize;

use super::{FileDigests, FileEntry, HashError, Hasher};

/// Timestamp layout used for `modified_at`, microsecond precision.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A discovered file together with its digests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Path as walked (relative to the working directory when the root was)
    pub path: PathBuf,
    /// Canonical absolute path, symlinks resolved
    pub absolute_path: PathBuf,
    /// File size in bytes at walk time
    pub size: u64,
    /// Raw modification time at walk time
    #[serde(skip)]
    pub modified: SystemTime,
    /// Modification time as `YYYY-MM-DD HH:MM:SS.ffffff`, local time zone
    pub modified_at: String,
    /// Content digests
    #[serde(flatten)]
    pub digests: FileDigests,
}

impl FileRecord {
    /// Digest a walked file and assemble its record.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be read or its path cannot
    /// be resolved.
    pub fn build(entry: &FileEntry, hasher: &Hasher) -> Result<Self, HashError> {
        let digests = hasher.digest_file(&entry.path)?;
        let absolute_path = std::fs::canonicalize(&entry.path)
            .map_err(|e| HashError::from_io(&entry.path, e))?;

        Ok(Self {
            path: entry.path.clone(),
            absolute_path,
            size: entry.size,
            modified: entry.modified,
            modified_at: format_timestamp(entry.modified),
            digests,
        })
    }

    /// SHA3-256 digest, the grouping key.
    #[must_use]
    pub fn strong_digest(&self) -> &str {
        &self.digests.sha3_256
    }

    /// Identity key: (SHA3-256, formatted mtime, walked path).
    #[must_use]
    pub fn sort_key(&self) -> (&str, &str, &Path) {
        (
            self.digests.sha3_256.as_str(),
            self.modified_at.as_str(),
            self.path.as_path(),
        )
    }
}

impl PartialOrd for FileRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FileRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.absolute_path.cmp(&other.absolute_path))
            .then_with(|| self.modified.cmp(&other.modified))
            .then_with(|| self.size.cmp(&other.size))
            .then_with(|| self.digests.md5.cmp(&other.digests.md5))
            .then_with(|| self.digests.sha1.cmp(&other.digests.sha1))
    }
}

/// Format a modification time in the local time zone with microseconds.
#[must_use]
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}
