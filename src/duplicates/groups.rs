//! Grouping of file records by content digest.
//!
//! # Overview
//!
//! [`HashGroups`] is an insertion-ordered mapping from SHA3-256 digest to
//! the [`DuplicateGroup`] of records sharing it. It is filled in a single
//! pass over records in walk order:
//!
//! - groups appear in the order their digest was first seen
//! - records inside a group keep walk order (never re-sorted)
//!
//! so element 0 of every group is the earliest file by modification time.
//!
//! # Example
//!
//! ```
//! use hashdupe::duplicates::HashGroups;
//! # use hashdupe::scanner::{FileDigests, FileRecord};
//! # use std::path::PathBuf;
//! # use std::time::SystemTime;
//! # fn record(path: &str, sha3: &str) -> FileRecord {
//! #     FileRecord {
//! #         path: PathBuf::from(path),
//! #         absolute_path: PathBuf::from("/data").join(path),
//! #         size: 1,
//! #         modified: SystemTime::UNIX_EPOCH,
//! #         modified_at: "1970-01-01 00:00:00.000000".to_string(),
//! #         digests: FileDigests {
//! #             md5: String::new(),
//! #             sha1: String::new(),
//! #             sha3_256: sha3.to_string(),
//! #         },
//! #     }
//! # }
//!
//! let groups = HashGroups::from_records(vec![
//!     record("a.txt", "x"),
//!     record("b.txt", "x"),
//!     record("c.txt", "y"),
//! ]);
//!
//! assert_eq!(groups.total_files(), 3);
//! assert_eq!(groups.len(), 2);
//! assert!(groups.has_duplicates());
//! ```

use indexmap::IndexMap;
use serde::Serialize;

use crate::scanner::FileRecord;

/// Files sharing one SHA3-256 digest, in walk order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// SHA3-256 digest shared by every file in the group
    pub digest: String,
    /// Records in walk order; index 0 is the original
    pub files: Vec<FileRecord>,
}

impl DuplicateGroup {
    /// Create an empty group for `digest`.
    #[must_use]
    pub fn new(digest: String) -> Self {
        Self {
            digest,
            files: Vec::new(),
        }
    }

    /// Append a record, keeping walk order.
    pub fn push(&mut self, record: FileRecord) {
        debug_assert_eq!(
            record.strong_digest(),
            self.digest,
            "record digest doesn't match group digest"
        );
        self.files.push(record);
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Check if this group has duplicates (2+ files).
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.files.len() > 1
    }

    /// The earliest file, kept as the original.
    #[must_use]
    pub fn original(&self) -> Option<&FileRecord> {
        self.files.first()
    }

    /// Every file after the original.
    #[must_use]
    pub fn duplicates(&self) -> &[FileRecord] {
        self.files.get(1..).unwrap_or_default()
    }

    /// Number of duplicate copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Bytes freed by removing every duplicate.
    #[must_use]
    pub fn reclaimable_space(&self) -> u64 {
        self.duplicates().iter().map(|f| f.size).sum()
    }
}

/// Statistics over a complete grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupingStats {
    /// Total number of files grouped
    pub total_files: usize,
    /// Number of distinct SHA3-256 digests
    pub distinct_hashes: usize,
    /// Number of groups with 2+ files
    pub duplicate_groups: usize,
    /// Number of files flagged as duplicates (originals excluded)
    pub duplicate_files: usize,
    /// Total size of all files in bytes
    pub total_size: u64,
    /// Bytes freed by removing every duplicate
    pub reclaimable_space: u64,
}

/// Insertion-ordered mapping from SHA3-256 digest to its group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashGroups {
    groups: IndexMap<String, DuplicateGroup>,
    total_files: usize,
}

impl HashGroups {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Group records in a single pass, preserving their order.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = FileRecord>) -> Self {
        let mut groups = Self::new();
        for record in records {
            groups.insert(record);
        }
        groups
    }

    /// Add a record to the group of its digest, creating it on first sight.
    pub fn insert(&mut self, record: FileRecord) {
        self.total_files += 1;
        let digest = record.strong_digest().to_string();
        log::trace!("Grouping {} under {}", record.path.display(), digest);
        self.groups
            .entry(digest.clone())
            .or_insert_with(|| DuplicateGroup::new(digest))
            .push(record);
    }

    /// Number of distinct digests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no file has been grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of files grouped.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.total_files
    }

    /// Check if any digest is shared by 2+ files.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.total_files != self.groups.len()
    }

    /// Look up the group of a digest.
    #[must_use]
    pub fn get(&self, digest: &str) -> Option<&DuplicateGroup> {
        self.groups.get(digest)
    }

    /// All groups in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.values()
    }

    /// Groups with 2+ files, in first-seen order.
    pub fn duplicate_groups(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.values().filter(|g| g.has_duplicates())
    }

    /// Every duplicate across all groups: group order, then walk order.
    pub fn all_duplicates(&self) -> impl Iterator<Item = &FileRecord> {
        self.duplicate_groups().flat_map(DuplicateGroup::duplicates)
    }

    /// Compute summary statistics.
    #[must_use]
    pub fn stats(&self) -> GroupingStats {
        let mut stats = GroupingStats {
            total_files: self.total_files,
            distinct_hashes: self.groups.len(),
            ..Default::default()
        };

        for group in self.groups.values() {
            stats.total_size += group.files.iter().map(|f| f.size).sum::<u64>();
            if group.has_duplicates() {
                stats.duplicate_groups += 1;
                stats.duplicate_files += group.duplicate_count();
                stats.reclaimable_space += group.reclaimable_space();
            }
        }

        stats
    }
}

impl<'a> IntoIterator for &'a HashGroups {
    type Item = &'a DuplicateGroup;
    type IntoIter = indexmap::map::Values<'a, String, DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.values()
    }
}
