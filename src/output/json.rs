//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "summary": {
//!     "total_files": 3,
//!     "distinct_hashes": 2,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "total_size": 3,
//!     "reclaimable_space": 1,
//!     "scan_duration_ms": 4
//!   },
//!   "groups": [
//!     {
//!       "sha3_256": "…",
//!       "original": { "path": "data/a.txt", "absolute_path": "/abs/data/a.txt", … },
//!       "duplicates": [ { "path": "data/b.txt", … } ]
//!     }
//!   ],
//!   "commands": {
//!     "posix": "rm -f \"/abs/data/b.txt\"",
//!     "powershell": "Remove-Item \"/abs/data/b.txt\""
//!   }
//! }
//! ```
//!
//! Only groups with duplicates are listed. `commands` is `null` when the
//! scan found none.

use std::io::Write;

use serde::Serialize;

use super::script::{ScriptOutput, ScriptType};
use crate::duplicates::{DuplicateGroup, HashGroups, ScanSummary};
use crate::scanner::FileRecord;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup<'a> {
    /// SHA3-256 digest shared by the group
    pub sha3_256: &'a str,
    /// Earliest file, the one to keep
    pub original: &'a FileRecord,
    /// Every later file with the same content
    pub duplicates: &'a [FileRecord],
}

impl<'a> JsonDuplicateGroup<'a> {
    /// Borrow a group for serialization. `None` for an empty group.
    #[must_use]
    pub fn from_duplicate_group(group: &'a DuplicateGroup) -> Option<Self> {
        Some(Self {
            sha3_256: &group.digest,
            original: group.original()?,
            duplicates: group.duplicates(),
        })
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonSummary {
    /// Total number of files scanned
    pub total_files: usize,
    /// Number of distinct SHA3-256 digests
    pub distinct_hashes: usize,
    /// Number of groups with at least one duplicate
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding originals)
    pub duplicate_files: usize,
    /// Total size of all scanned files in bytes
    pub total_size: u64,
    /// Bytes freed by deleting every duplicate
    pub reclaimable_space: u64,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
}

impl From<&ScanSummary> for JsonSummary {
    fn from(summary: &ScanSummary) -> Self {
        Self {
            total_files: summary.total_files,
            distinct_hashes: summary.distinct_hashes,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            total_size: summary.total_size,
            reclaimable_space: summary.reclaimable_space,
            scan_duration_ms: u64::try_from(summary.scan_duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Deletion commands in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonCommands {
    /// POSIX `rm -f` command
    pub posix: String,
    /// PowerShell `Remove-Item` command
    pub powershell: String,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Scan summary statistics
    pub summary: JsonSummary,
    /// Groups that contain duplicates, in first-seen order
    pub groups: Vec<JsonDuplicateGroup<'a>>,
    /// Deletion commands, absent without duplicates
    pub commands: Option<JsonCommands>,
}

impl<'a> JsonOutput<'a> {
    /// Create a new JSON output from grouped results and their summary.
    ///
    /// # Example
    ///
    /// ```
    /// use hashdupe::duplicates::{HashGroups, ScanSummary};
    /// use hashdupe::output::json::JsonOutput;
    ///
    /// let groups = HashGroups::new();
    /// let output = JsonOutput::new(&groups, &ScanSummary::default());
    /// assert!(output.groups.is_empty());
    /// assert!(output.commands.is_none());
    /// ```
    #[must_use]
    pub fn new(groups: &'a HashGroups, summary: &ScanSummary) -> Self {
        let script = ScriptOutput::new(groups);
        let commands = match (
            script.command(ScriptType::Posix),
            script.command(ScriptType::PowerShell),
        ) {
            (Some(posix), Some(powershell)) => Some(JsonCommands { posix, powershell }),
            _ => None,
        };

        Self {
            summary: JsonSummary::from(summary),
            groups: groups
                .duplicate_groups()
                .filter_map(JsonDuplicateGroup::from_duplicate_group)
                .collect(),
            commands,
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
