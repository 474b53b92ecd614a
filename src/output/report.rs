//! Plain-text report of a duplicate scan.
//!
//! Layout:
//!
//! ```text
//! 3 files, 2 hashes (duplicates found)
//!
//! data/a.txt has 1 duplicate(s) (SHA3-256 <digest>)
//! [ FileRecord { path: "data/b.txt", modified_at: "2024-05-01 09:30:00.000000" }]
//!
//! Found 1 duplicate file(s)
//!
//! Linux command to delete:
//! rm -f "/abs/data/b.txt"
//!
//! PowerShell command to delete:
//! Remove-Item "/abs/data/b.txt"
//! ```
//!
//! The summary line is always followed by one empty line. Groups follow
//! each other without separators; the count and the commands are only
//! written when at least one duplicate exists.

use std::io::Write;

use super::script::{ScriptOutput, ScriptType};
use crate::duplicates::HashGroups;
use crate::scanner::FileRecord;

/// Formatter for the text report.
pub struct TextReport<'a> {
    groups: &'a HashGroups,
}

impl<'a> TextReport<'a> {
    /// Create a report over grouped scan results.
    #[must_use]
    pub fn new(groups: &'a HashGroups) -> Self {
        Self { groups }
    }

    /// The first line: file and hash counts.
    #[must_use]
    pub fn summary_line(&self) -> String {
        let files = self.groups.total_files();
        let hashes = self.groups.len();
        let flag = if self.groups.has_duplicates() {
            " (duplicates found)"
        } else {
            ""
        };
        format!("{files} files, {hashes} hashes{flag}")
    }

    /// Write the full report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}", self.summary_line())?;
        writeln!(writer)?;

        let mut duplicate_count = 0;
        for group in self.groups.duplicate_groups() {
            let Some(original) = group.original() else {
                continue;
            };
            writeln!(
                writer,
                "{} has {} duplicate(s) (SHA3-256 {})",
                original.path.display(),
                group.duplicate_count(),
                group.digest
            )?;
            write_record_list(writer, group.duplicates())?;
            duplicate_count += group.duplicate_count();
        }

        if duplicate_count == 0 {
            return Ok(());
        }

        writeln!(writer)?;
        writeln!(writer, "Found {} duplicate file(s)", duplicate_count)?;

        let script = ScriptOutput::new(self.groups);
        for script_type in ScriptType::ALL {
            if let Some(command) = script.command(script_type) {
                writeln!(writer)?;
                writeln!(writer, "{}", script_type.label())?;
                writeln!(writer, "{}", command)?;
            }
        }

        Ok(())
    }

    /// Render the report into a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

/// Write records as a bracketed list, one per line, continuation lines
/// indented by two spaces.
fn write_record_list<W: Write>(writer: &mut W, records: &[FileRecord]) -> std::io::Result<()> {
    if records.is_empty() {
        return writeln!(writer, "[]");
    }

    for (i, record) in records.iter().enumerate() {
        let open = if i == 0 { "[ " } else { "  " };
        let close = if i + 1 == records.len() { "]" } else { "," };
        writeln!(
            writer,
            "{open}FileRecord {{ path: {:?}, modified_at: {:?} }}{close}",
            record.path, record.modified_at
        )?;
    }
    Ok(())
}
